//! Driving port for toggling favorites, cart entries and follows.

use async_trait::async_trait;

use crate::domain::{Error, Relationship};

/// Add or remove relationship rows on behalf of an authenticated user.
///
/// Failures use the domain taxonomy: `already_exists` for a duplicate add,
/// `relationship_not_found` for removing an absent row, `not_found` for a
/// missing target and `invalid_operation` for self-follow.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelationshipCommand: Send + Sync {
    async fn add(&self, relationship: &Relationship) -> Result<(), Error>;

    async fn remove(&self, relationship: &Relationship) -> Result<(), Error>;
}

/// Fixture implementation accepting every toggle.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRelationshipCommand;

#[async_trait]
impl RelationshipCommand for FixtureRelationshipCommand {
    async fn add(&self, _relationship: &Relationship) -> Result<(), Error> {
        Ok(())
    }

    async fn remove(&self, _relationship: &Relationship) -> Result<(), Error> {
        Ok(())
    }
}
