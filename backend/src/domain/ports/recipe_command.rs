//! Driving port for recipe writes.

use async_trait::async_trait;

use crate::domain::{Error, RecipeDraft, RecipeId, RecipeView, UserId};

/// Create, replace and delete recipes.
///
/// Drafts are validated against the configured limits before anything is
/// written; every write is atomic.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeCommand: Send + Sync {
    /// Publish a new recipe authored by `author`.
    async fn create(&self, author: &UserId, draft: RecipeDraft) -> Result<RecipeView, Error>;

    /// Replace a recipe owned by `editor`.
    async fn update(
        &self,
        editor: &UserId,
        id: RecipeId,
        draft: RecipeDraft,
    ) -> Result<RecipeView, Error>;

    /// Delete a recipe owned by `editor`.
    async fn delete(&self, editor: &UserId, id: RecipeId) -> Result<(), Error>;
}

/// Fixture implementation refusing writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecipeCommand;

#[async_trait]
impl RecipeCommand for FixtureRecipeCommand {
    async fn create(&self, _author: &UserId, _draft: RecipeDraft) -> Result<RecipeView, Error> {
        Err(Error::service_unavailable("recipe storage is not configured"))
    }

    async fn update(
        &self,
        _editor: &UserId,
        id: RecipeId,
        _draft: RecipeDraft,
    ) -> Result<RecipeView, Error> {
        Err(Error::not_found(format!("recipe {id} not found")))
    }

    async fn delete(&self, _editor: &UserId, id: RecipeId) -> Result<(), Error> {
        Err(Error::not_found(format!("recipe {id} not found")))
    }
}
