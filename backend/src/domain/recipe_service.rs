//! Recipe domain services.
//!
//! Writes go through the write model: a [`RecipeDraft`] is validated against
//! the configured [`RecipeLimits`] and only the resulting command reaches the
//! repository. Reads go through the read model: stored recipes are projected
//! into [`RecipeView`]s decorated with the viewer's flags.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    RecipeCommand, RecipeQuery, RecipeRepository, RecipeRepositoryError, RelationshipRepository,
    RelationshipRepositoryError,
};
use crate::domain::{
    DraftMode, Error, Page, PageRequest, Recipe, RecipeDraft, RecipeFilter, RecipeFlags, RecipeId,
    RecipeLimits, RecipeSummary, RecipeView, UserId,
};

fn map_recipe_error(error: RecipeRepositoryError) -> Error {
    match error {
        RecipeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("recipe repository unavailable: {message}"))
        }
        RecipeRepositoryError::Query { message } => {
            Error::internal(format!("recipe repository error: {message}"))
        }
        RecipeRepositoryError::RecipeMissing { id } => recipe_not_found(id),
        RecipeRepositoryError::MissingIngredients { ids } => {
            Error::not_found("some ingredients do not exist").with_details(json!({
                "field": "ingredients",
                "ids": ids.iter().map(|id| id.get()).collect::<Vec<_>>(),
            }))
        }
        RecipeRepositoryError::MissingTags { ids } => {
            Error::not_found("some tags do not exist").with_details(json!({
                "field": "tags",
                "ids": ids.iter().map(|id| id.get()).collect::<Vec<_>>(),
            }))
        }
        RecipeRepositoryError::Conflict { message } => {
            Error::invalid_operation(format!("recipe write rejected: {message}"))
        }
    }
}

fn map_relationship_error(error: RelationshipRepositoryError) -> Error {
    match error {
        RelationshipRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("relationship repository unavailable: {message}"))
        }
        other => Error::internal(format!("relationship lookup failed: {other}")),
    }
}

fn recipe_not_found(id: RecipeId) -> Error {
    Error::not_found(format!("recipe {id} not found"))
}

/// Recipe service implementing the recipe command and query ports.
#[derive(Clone)]
pub struct RecipeService<R, L> {
    recipe_repo: Arc<R>,
    relationship_repo: Arc<L>,
    limits: RecipeLimits,
}

impl<R, L> RecipeService<R, L> {
    /// Create a new service; `limits` bound every draft it validates.
    pub fn new(recipe_repo: Arc<R>, relationship_repo: Arc<L>, limits: RecipeLimits) -> Self {
        Self {
            recipe_repo,
            relationship_repo,
            limits,
        }
    }
}

impl<R, L> RecipeService<R, L>
where
    R: RecipeRepository,
    L: RelationshipRepository,
{
    async fn load(&self, id: RecipeId) -> Result<Recipe, Error> {
        self.recipe_repo
            .find(id)
            .await
            .map_err(map_recipe_error)?
            .ok_or_else(|| recipe_not_found(id))
    }

    /// Resolve the author of `id` and require it to be `editor`.
    async fn authorize(&self, editor: &UserId, id: RecipeId) -> Result<(), Error> {
        let author = self
            .recipe_repo
            .author_of(id)
            .await
            .map_err(map_recipe_error)?
            .ok_or_else(|| recipe_not_found(id))?;
        if author != *editor {
            return Err(Error::forbidden("only the author may change this recipe"));
        }
        Ok(())
    }

    /// Project recipes for `viewer`, fetching flags in two batched lookups.
    async fn project(
        &self,
        viewer: Option<UserId>,
        recipes: Vec<Recipe>,
    ) -> Result<Vec<RecipeView>, Error> {
        let Some(viewer) = viewer else {
            return Ok(recipes
                .into_iter()
                .map(|recipe| RecipeView::project(recipe, RecipeFlags::default(), false))
                .collect());
        };
        if recipes.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<RecipeId> = recipes.iter().map(|recipe| recipe.id).collect();
        let flags = self
            .relationship_repo
            .recipe_flags(&viewer, &ids)
            .await
            .map_err(map_relationship_error)?;

        let mut authors: Vec<UserId> = recipes.iter().map(Recipe::author_id).collect();
        authors.sort_unstable();
        authors.dedup();
        let followed: HashSet<UserId> = self
            .relationship_repo
            .followed_among(&viewer, &authors)
            .await
            .map_err(map_relationship_error)?
            .into_iter()
            .collect();

        Ok(recipes
            .into_iter()
            .enumerate()
            .map(|(index, recipe)| {
                let recipe_flags = flags.get(index).copied().unwrap_or_default();
                let is_subscribed = followed.contains(&recipe.author_id());
                RecipeView::project(recipe, recipe_flags, is_subscribed)
            })
            .collect())
    }

    async fn project_one(&self, viewer: Option<UserId>, recipe: Recipe) -> Result<RecipeView, Error> {
        let id = recipe.id;
        self.project(viewer, vec![recipe])
            .await?
            .pop()
            .ok_or_else(|| recipe_not_found(id))
    }
}

#[async_trait]
impl<R, L> RecipeCommand for RecipeService<R, L>
where
    R: RecipeRepository,
    L: RelationshipRepository,
{
    async fn create(&self, author: &UserId, draft: RecipeDraft) -> Result<RecipeView, Error> {
        let command = draft.validate(&self.limits, DraftMode::Create)?;
        let id = self
            .recipe_repo
            .create(author, &command)
            .await
            .map_err(map_recipe_error)?;
        info!(user_id = %author, recipe_id = %id, "recipe created");
        let recipe = self.load(id).await?;
        self.project_one(Some(*author), recipe).await
    }

    async fn update(
        &self,
        editor: &UserId,
        id: RecipeId,
        draft: RecipeDraft,
    ) -> Result<RecipeView, Error> {
        self.authorize(editor, id).await?;
        let command = draft.validate(&self.limits, DraftMode::Update)?;
        self.recipe_repo
            .update(id, &command)
            .await
            .map_err(map_recipe_error)?;
        info!(user_id = %editor, recipe_id = %id, "recipe updated");
        let recipe = self.load(id).await?;
        self.project_one(Some(*editor), recipe).await
    }

    async fn delete(&self, editor: &UserId, id: RecipeId) -> Result<(), Error> {
        self.authorize(editor, id).await?;
        self.recipe_repo.delete(id).await.map_err(map_recipe_error)?;
        info!(user_id = %editor, recipe_id = %id, "recipe deleted");
        Ok(())
    }
}

#[async_trait]
impl<R, L> RecipeQuery for RecipeService<R, L>
where
    R: RecipeRepository,
    L: RelationshipRepository,
{
    async fn get(&self, viewer: Option<UserId>, id: RecipeId) -> Result<RecipeView, Error> {
        let recipe = self.load(id).await?;
        self.project_one(viewer, recipe).await
    }

    async fn list(
        &self,
        viewer: Option<UserId>,
        filter: RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<RecipeView>, Error> {
        let recipes = self
            .recipe_repo
            .list(&filter, page)
            .await
            .map_err(map_recipe_error)?;
        let items = self.project(viewer, recipes.items).await?;
        Ok(Page {
            count: recipes.count,
            items,
            request: recipes.request,
        })
    }

    async fn summary(&self, id: RecipeId) -> Result<RecipeSummary, Error> {
        Ok(self.load(id).await?.summary())
    }
}

#[cfg(test)]
#[path = "recipe_service_tests.rs"]
mod tests;
