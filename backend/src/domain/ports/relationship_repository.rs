//! Port for the favorite, shopping-cart and follow relationship sets.
//!
//! Adapters own atomicity: `insert` and `delete` check the target and mutate
//! the row inside one transaction, and translate store constraint signals
//! into the error variants below.

use async_trait::async_trait;

use crate::domain::{RecipeFlags, RecipeId, Relationship, RelationshipKind, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by relationship repository adapters.
    pub enum RelationshipRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "relationship repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "relationship repository query failed: {message}",
        /// The recipe or author the row points at does not exist.
        TargetMissing { kind: RelationshipKind, target: String } =>
            "{kind} target {target} does not exist",
        /// The row is already present.
        Duplicate { kind: RelationshipKind } =>
            "{kind} relationship already exists",
        /// The row to delete is absent.
        Missing { kind: RelationshipKind } =>
            "{kind} relationship does not exist",
        /// The store refused a follow pointing at its own follower.
        SelfReference =>
            "users cannot follow themselves",
    }
}

/// Port for relationship membership storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelationshipRepository: Send + Sync {
    /// Insert a row.
    ///
    /// Fails with [`RelationshipRepositoryError::TargetMissing`] when the
    /// target does not exist and [`RelationshipRepositoryError::Duplicate`]
    /// when the row is already present, including when a concurrent insert
    /// wins the race.
    async fn insert(&self, relationship: &Relationship) -> Result<(), RelationshipRepositoryError>;

    /// Delete a row.
    ///
    /// Fails with [`RelationshipRepositoryError::TargetMissing`] when the
    /// target does not exist and [`RelationshipRepositoryError::Missing`]
    /// when it exists but the row does not.
    async fn delete(&self, relationship: &Relationship) -> Result<(), RelationshipRepositoryError>;

    /// Membership test for a single row.
    async fn contains(&self, relationship: &Relationship)
    -> Result<bool, RelationshipRepositoryError>;

    /// Favorite and cart flags of `user` for each of `recipes`, in input order.
    async fn recipe_flags(
        &self,
        user: &UserId,
        recipes: &[RecipeId],
    ) -> Result<Vec<RecipeFlags>, RelationshipRepositoryError>;

    /// Subset of `authors` that `follower` follows.
    async fn followed_among(
        &self,
        follower: &UserId,
        authors: &[UserId],
    ) -> Result<Vec<UserId>, RelationshipRepositoryError>;
}

/// Fixture implementation that accepts every mutation and reports no
/// memberships.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRelationshipRepository;

#[async_trait]
impl RelationshipRepository for FixtureRelationshipRepository {
    async fn insert(&self, _relationship: &Relationship) -> Result<(), RelationshipRepositoryError> {
        Ok(())
    }

    async fn delete(&self, _relationship: &Relationship) -> Result<(), RelationshipRepositoryError> {
        Ok(())
    }

    async fn contains(
        &self,
        _relationship: &Relationship,
    ) -> Result<bool, RelationshipRepositoryError> {
        Ok(false)
    }

    async fn recipe_flags(
        &self,
        _user: &UserId,
        recipes: &[RecipeId],
    ) -> Result<Vec<RecipeFlags>, RelationshipRepositoryError> {
        Ok(vec![RecipeFlags::default(); recipes.len()])
    }

    async fn followed_among(
        &self,
        _follower: &UserId,
        _authors: &[UserId],
    ) -> Result<Vec<UserId>, RelationshipRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn fixture_reports_default_flags_per_recipe() {
        let flags = FixtureRelationshipRepository
            .recipe_flags(&UserId::random(), &[RecipeId::new(1), RecipeId::new(2)])
            .await
            .expect("fixture flags");
        assert_eq!(flags, vec![RecipeFlags::default(); 2]);
    }

    #[rstest]
    fn target_missing_names_kind_and_target() {
        let err = RelationshipRepositoryError::target_missing(RelationshipKind::Favorite, "12");
        assert_eq!(err.to_string(), "favorite target 12 does not exist");
    }
}
