//! Port for recipe persistence.
//!
//! Writes take a [`ValidatedRecipe`]; adapters store the recipe row, its tag
//! links and its ingredient amounts in one transaction, replacing any
//! previous links wholesale.

use async_trait::async_trait;

use crate::domain::{
    IngredientId, Page, PageRequest, Recipe, RecipeFilter, RecipeId, TagId, UserId,
    ValidatedRecipe,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by recipe repository adapters.
    pub enum RecipeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "recipe repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "recipe repository query failed: {message}",
        /// The recipe being changed does not exist.
        RecipeMissing { id: RecipeId } =>
            "recipe {id} does not exist",
        /// Some requested ingredients do not exist.
        MissingIngredients { ids: Vec<IngredientId> } =>
            "unknown ingredients: {ids:?}",
        /// Some requested tags do not exist.
        MissingTags { ids: Vec<TagId> } =>
            "unknown tags: {ids:?}",
        /// A uniqueness constraint rejected the write.
        Conflict { message: String } =>
            "recipe write conflicted: {message}",
    }
}

/// Port for recipe storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Fetch a recipe with author, tags and ingredient amounts.
    async fn find(&self, id: RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError>;

    /// Author of a recipe, without loading the rest of it.
    async fn author_of(&self, id: RecipeId) -> Result<Option<UserId>, RecipeRepositoryError>;

    /// List recipes newest first.
    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, RecipeRepositoryError>;

    /// Insert a recipe with its tags and ingredient amounts.
    async fn create(
        &self,
        author: &UserId,
        recipe: &ValidatedRecipe,
    ) -> Result<RecipeId, RecipeRepositoryError>;

    /// Overwrite a recipe's fields and replace its tags and amounts.
    async fn update(
        &self,
        id: RecipeId,
        recipe: &ValidatedRecipe,
    ) -> Result<(), RecipeRepositoryError>;

    /// Delete a recipe; dependent rows cascade.
    async fn delete(&self, id: RecipeId) -> Result<(), RecipeRepositoryError>;
}

/// Fixture implementation holding no recipes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecipeRepository;

#[async_trait]
impl RecipeRepository for FixtureRecipeRepository {
    async fn find(&self, _id: RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError> {
        Ok(None)
    }

    async fn author_of(&self, _id: RecipeId) -> Result<Option<UserId>, RecipeRepositoryError> {
        Ok(None)
    }

    async fn list(
        &self,
        _filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, RecipeRepositoryError> {
        Ok(Page {
            count: 0,
            items: Vec::new(),
            request: page,
        })
    }

    async fn create(
        &self,
        _author: &UserId,
        _recipe: &ValidatedRecipe,
    ) -> Result<RecipeId, RecipeRepositoryError> {
        Err(RecipeRepositoryError::connection("no recipe store configured"))
    }

    async fn update(
        &self,
        id: RecipeId,
        _recipe: &ValidatedRecipe,
    ) -> Result<(), RecipeRepositoryError> {
        Err(RecipeRepositoryError::recipe_missing(id))
    }

    async fn delete(&self, id: RecipeId) -> Result<(), RecipeRepositoryError> {
        Err(RecipeRepositoryError::recipe_missing(id))
    }
}
