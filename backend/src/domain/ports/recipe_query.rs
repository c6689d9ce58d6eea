//! Driving port for the recipe read model.

use async_trait::async_trait;

use crate::domain::{
    Error, Page, PageRequest, RecipeFilter, RecipeId, RecipeSummary, RecipeView, UserId,
};

/// Read recipes as seen by an optional viewer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeQuery: Send + Sync {
    /// Full projection of one recipe.
    async fn get(&self, viewer: Option<UserId>, id: RecipeId) -> Result<RecipeView, Error>;

    /// Paginated projections, newest first.
    async fn list(
        &self,
        viewer: Option<UserId>,
        filter: RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<RecipeView>, Error>;

    /// Short projection of one recipe.
    async fn summary(&self, id: RecipeId) -> Result<RecipeSummary, Error>;
}

/// Fixture implementation with no recipes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecipeQuery;

#[async_trait]
impl RecipeQuery for FixtureRecipeQuery {
    async fn get(&self, _viewer: Option<UserId>, id: RecipeId) -> Result<RecipeView, Error> {
        Err(Error::not_found(format!("recipe {id} not found")))
    }

    async fn list(
        &self,
        _viewer: Option<UserId>,
        _filter: RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<RecipeView>, Error> {
        Ok(Page {
            count: 0,
            items: Vec::new(),
            request: page,
        })
    }

    async fn summary(&self, id: RecipeId) -> Result<RecipeSummary, Error> {
        Err(Error::not_found(format!("recipe {id} not found")))
    }
}
