//! Relationship toggle service.
//!
//! Implements the favorite, shopping-cart and follow toggles plus the
//! viewer membership flags. Store-level constraint signals arrive as typed
//! repository errors and leave here as the domain error taxonomy.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    RelationshipCommand, RelationshipQuery, RelationshipRepository, RelationshipRepositoryError,
};
use crate::domain::{Error, RecipeId, Relationship, RelationshipKind, UserId};

fn map_repository_error(relationship: &Relationship, error: RelationshipRepositoryError) -> Error {
    let kind = relationship.kind();
    match error {
        RelationshipRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("relationship repository unavailable: {message}"))
        }
        RelationshipRepositoryError::Query { message } => {
            Error::internal(format!("relationship repository error: {message}"))
        }
        RelationshipRepositoryError::TargetMissing { target, .. } => Error::not_found(format!(
            "{} {target} not found",
            relationship.target_noun()
        )),
        RelationshipRepositoryError::Duplicate { .. } => {
            Error::already_exists(already_exists_message(kind)).with_details(json!({
                "kind": kind.as_str(),
                "target": relationship.target_label(),
            }))
        }
        RelationshipRepositoryError::Missing { .. } => {
            Error::relationship_not_found(missing_message(kind)).with_details(json!({
                "kind": kind.as_str(),
                "target": relationship.target_label(),
            }))
        }
        RelationshipRepositoryError::SelfReference => self_follow_error(),
    }
}

fn already_exists_message(kind: RelationshipKind) -> &'static str {
    match kind {
        RelationshipKind::Favorite => "recipe is already in favorites",
        RelationshipKind::ShoppingCart => "recipe is already in the shopping cart",
        RelationshipKind::Follow => "already subscribed to this author",
    }
}

fn missing_message(kind: RelationshipKind) -> &'static str {
    match kind {
        RelationshipKind::Favorite => "recipe is not in favorites",
        RelationshipKind::ShoppingCart => "recipe is not in the shopping cart",
        RelationshipKind::Follow => "not subscribed to this author",
    }
}

fn self_follow_error() -> Error {
    Error::invalid_operation("users cannot subscribe to themselves")
        .with_details(json!({ "code": "self_follow" }))
}

/// Relationship service implementing the toggle and flag driving ports.
#[derive(Clone)]
pub struct RelationshipService<R> {
    relationship_repo: Arc<R>,
}

impl<R> RelationshipService<R> {
    /// Create a new service over the relationship repository.
    pub fn new(relationship_repo: Arc<R>) -> Self {
        Self { relationship_repo }
    }
}

impl<R> RelationshipService<R>
where
    R: RelationshipRepository,
{
    async fn contains(&self, relationship: Relationship) -> Result<bool, Error> {
        self.relationship_repo
            .contains(&relationship)
            .await
            .map_err(|err| map_repository_error(&relationship, err))
    }
}

#[async_trait]
impl<R> RelationshipCommand for RelationshipService<R>
where
    R: RelationshipRepository,
{
    async fn add(&self, relationship: &Relationship) -> Result<(), Error> {
        if relationship.is_self_follow() {
            return Err(self_follow_error());
        }
        self.relationship_repo
            .insert(relationship)
            .await
            .map_err(|err| map_repository_error(relationship, err))?;
        info!(
            user_id = %relationship.owner(),
            kind = %relationship.kind(),
            target = %relationship.target_label(),
            "relationship added"
        );
        Ok(())
    }

    async fn remove(&self, relationship: &Relationship) -> Result<(), Error> {
        self.relationship_repo
            .delete(relationship)
            .await
            .map_err(|err| map_repository_error(relationship, err))?;
        info!(
            user_id = %relationship.owner(),
            kind = %relationship.kind(),
            target = %relationship.target_label(),
            "relationship removed"
        );
        Ok(())
    }
}

#[async_trait]
impl<R> RelationshipQuery for RelationshipService<R>
where
    R: RelationshipRepository,
{
    async fn is_favorited(&self, recipe: RecipeId, viewer: Option<UserId>) -> Result<bool, Error> {
        let Some(user) = viewer else {
            return Ok(false);
        };
        self.contains(Relationship::Favorite { user, recipe }).await
    }

    async fn is_in_cart(&self, recipe: RecipeId, viewer: Option<UserId>) -> Result<bool, Error> {
        let Some(user) = viewer else {
            return Ok(false);
        };
        self.contains(Relationship::ShoppingCart { user, recipe })
            .await
    }

    async fn is_subscribed(&self, author: UserId, viewer: Option<UserId>) -> Result<bool, Error> {
        let Some(follower) = viewer else {
            return Ok(false);
        };
        self.contains(Relationship::Follow { follower, author })
            .await
    }
}

#[cfg(test)]
#[path = "relationship_service_tests.rs"]
mod tests;
