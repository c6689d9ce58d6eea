//! PostgreSQL-backed recipe repository.
//!
//! Writes run in a single transaction: the referenced tags and ingredients
//! are checked first, then the recipe row is written and its tag links and
//! ingredient amounts are cleared and re-inserted. Reads hydrate a page of
//! recipe rows with three batched queries (authors, tags, amounts).

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{RecipeRepository, RecipeRepositoryError};
use crate::domain::{
    IngredientAmount, IngredientId, Page, PageRequest, Recipe, RecipeFilter, RecipeId, Tag,
    TagId, User, UserId, ValidatedRecipe,
};

use super::diesel_basic_error_mapping::{
    StoreFailure, classify_diesel_error, map_basic_failure, pool_error_message,
};
use super::models::{
    IngredientRow, NewRecipeIngredientRow, NewRecipeRow, NewRecipeTagRow, RecipeChangeset,
    RecipeRow, TagRow, UserRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{
    favorites, ingredients, recipe_ingredients, recipe_tags, recipes, shopping_cart_entries,
    tags, users,
};

/// Diesel-backed implementation of the recipe port.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failure inside a recipe write transaction.
enum WriteFailure {
    RecipeMissing,
    MissingTags(Vec<TagId>),
    MissingIngredients(Vec<IngredientId>),
    Diesel(diesel::result::Error),
}

impl From<diesel::result::Error> for WriteFailure {
    fn from(err: diesel::result::Error) -> Self {
        Self::Diesel(err)
    }
}

fn map_pool_error(error: PoolError) -> RecipeRepositoryError {
    RecipeRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> RecipeRepositoryError {
    map_basic_failure(
        classify_diesel_error(error),
        RecipeRepositoryError::query,
        RecipeRepositoryError::connection,
    )
}

fn map_write_failure(id: Option<RecipeId>, failure: WriteFailure) -> RecipeRepositoryError {
    match failure {
        WriteFailure::RecipeMissing => match id {
            Some(id) => RecipeRepositoryError::recipe_missing(id),
            None => RecipeRepositoryError::query("recipe row vanished during write"),
        },
        WriteFailure::MissingTags(ids) => RecipeRepositoryError::missing_tags(ids),
        WriteFailure::MissingIngredients(ids) => RecipeRepositoryError::missing_ingredients(ids),
        WriteFailure::Diesel(err) => match classify_diesel_error(err) {
            StoreFailure::Unique { constraint } => RecipeRepositoryError::conflict(
                constraint.unwrap_or_else(|| "unique constraint".to_owned()),
            ),
            failure => map_basic_failure(
                failure,
                RecipeRepositoryError::query,
                RecipeRepositoryError::connection,
            ),
        },
    }
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

fn filtered(filter: &RecipeFilter) -> recipes::BoxedQuery<'_, Pg> {
    let mut query = recipes::table.into_boxed();
    if let Some(author) = filter.author {
        query = query.filter(recipes::author_id.eq(*author.as_uuid()));
    }
    if !filter.tag_slugs.is_empty() {
        query = query.filter(
            recipes::id.eq_any(
                recipe_tags::table
                    .inner_join(tags::table)
                    .filter(tags::slug.eq_any(&filter.tag_slugs))
                    .select(recipe_tags::recipe_id),
            ),
        );
    }
    if let Some(user) = filter.favorited_by {
        query = query.filter(
            recipes::id.eq_any(
                favorites::table
                    .filter(favorites::user_id.eq(*user.as_uuid()))
                    .select(favorites::recipe_id),
            ),
        );
    }
    if let Some(user) = filter.in_cart_of {
        query = query.filter(
            recipes::id.eq_any(
                shopping_cart_entries::table
                    .filter(shopping_cart_entries::user_id.eq(*user.as_uuid()))
                    .select(shopping_cart_entries::recipe_id),
            ),
        );
    }
    query
}

/// Attach authors, tags and ingredient amounts to recipe rows, keeping the
/// row order.
async fn hydrate(conn: &mut AsyncPgConnection, rows: Vec<RecipeRow>) -> QueryResult<Vec<Recipe>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let recipe_ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    let mut author_ids: Vec<Uuid> = rows.iter().map(|row| row.author_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();

    let authors: HashMap<Uuid, User> = users::table
        .filter(users::id.eq_any(&author_ids))
        .select(UserRow::as_select())
        .load::<UserRow>(conn)
        .await?
        .into_iter()
        .map(|row| (row.id, User::from(row)))
        .collect();

    let tag_rows: Vec<(i64, TagRow)> = recipe_tags::table
        .inner_join(tags::table)
        .filter(recipe_tags::recipe_id.eq_any(&recipe_ids))
        .order((recipe_tags::recipe_id, tags::id))
        .select((recipe_tags::recipe_id, TagRow::as_select()))
        .load(conn)
        .await?;
    let mut tags_by_recipe: HashMap<i64, Vec<Tag>> = HashMap::new();
    for (recipe_id, tag) in tag_rows {
        tags_by_recipe
            .entry(recipe_id)
            .or_default()
            .push(Tag::from(tag));
    }

    let amount_rows: Vec<(i64, i32, IngredientRow)> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq_any(&recipe_ids))
        .order(recipe_ingredients::id)
        .select((
            recipe_ingredients::recipe_id,
            recipe_ingredients::amount,
            IngredientRow::as_select(),
        ))
        .load(conn)
        .await?;
    let mut amounts_by_recipe: HashMap<i64, Vec<IngredientAmount>> = HashMap::new();
    for (recipe_id, amount, ingredient) in amount_rows {
        amounts_by_recipe
            .entry(recipe_id)
            .or_default()
            .push(IngredientAmount {
                ingredient: ingredient.into(),
                amount,
            });
    }

    rows.into_iter()
        .map(|row| {
            // recipes.author_id is a cascading foreign key, so a missing
            // author means the row was deleted between queries.
            let author = authors
                .get(&row.author_id)
                .cloned()
                .ok_or(diesel::result::Error::NotFound)?;
            Ok(Recipe {
                id: RecipeId::new(row.id),
                fields: row.fields(),
                tags: tags_by_recipe.remove(&row.id).unwrap_or_default(),
                ingredients: amounts_by_recipe.remove(&row.id).unwrap_or_default(),
                created_at: row.created_at,
                author,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

async fn missing_tags(
    conn: &mut AsyncPgConnection,
    requested: &[TagId],
) -> QueryResult<Vec<TagId>> {
    let ids: Vec<i64> = requested.iter().map(|id| id.get()).collect();
    let found: Vec<i64> = tags::table
        .filter(tags::id.eq_any(&ids))
        .select(tags::id)
        .load(conn)
        .await?;
    Ok(requested
        .iter()
        .copied()
        .filter(|id| !found.contains(&id.get()))
        .collect())
}

async fn missing_ingredients(
    conn: &mut AsyncPgConnection,
    recipe: &ValidatedRecipe,
) -> QueryResult<Vec<IngredientId>> {
    let ids: Vec<i64> = recipe.ingredients().iter().map(|line| line.id.get()).collect();
    let found: Vec<i64> = ingredients::table
        .filter(ingredients::id.eq_any(&ids))
        .select(ingredients::id)
        .load(conn)
        .await?;
    Ok(recipe
        .ingredients()
        .iter()
        .map(|line| line.id)
        .filter(|id| !found.contains(&id.get()))
        .collect())
}

async fn check_catalogue(
    conn: &mut AsyncPgConnection,
    recipe: &ValidatedRecipe,
) -> Result<(), WriteFailure> {
    let tags = missing_tags(conn, recipe.tags()).await?;
    if !tags.is_empty() {
        return Err(WriteFailure::MissingTags(tags));
    }
    let ingredients = missing_ingredients(conn, recipe).await?;
    if !ingredients.is_empty() {
        return Err(WriteFailure::MissingIngredients(ingredients));
    }
    Ok(())
}

/// Clear a recipe's tag links and ingredient amounts and insert the new set.
async fn replace_links(
    conn: &mut AsyncPgConnection,
    recipe_id: i64,
    recipe: &ValidatedRecipe,
) -> QueryResult<()> {
    diesel::delete(recipe_tags::table.filter(recipe_tags::recipe_id.eq(recipe_id)))
        .execute(conn)
        .await?;
    diesel::delete(recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq(recipe_id)))
        .execute(conn)
        .await?;

    let tag_rows: Vec<NewRecipeTagRow> = recipe
        .tags()
        .iter()
        .map(|tag| NewRecipeTagRow {
            recipe_id,
            tag_id: tag.get(),
        })
        .collect();
    if !tag_rows.is_empty() {
        diesel::insert_into(recipe_tags::table)
            .values(&tag_rows)
            .execute(conn)
            .await?;
    }

    let amount_rows: Vec<NewRecipeIngredientRow> = recipe
        .ingredients()
        .iter()
        .map(|line| NewRecipeIngredientRow {
            recipe_id,
            ingredient_id: line.id.get(),
            amount: line.amount,
        })
        .collect();
    if !amount_rows.is_empty() {
        diesel::insert_into(recipe_ingredients::table)
            .values(&amount_rows)
            .execute(conn)
            .await?;
    }
    Ok(())
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn find(&self, id: RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<RecipeRow> = recipes::table
            .find(id.get())
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let Some(row) = row else {
            return Ok(None);
        };
        let recipes = hydrate(&mut conn, vec![row])
            .await
            .map_err(map_diesel_error)?;
        Ok(recipes.into_iter().next())
    }

    async fn author_of(&self, id: RecipeId) -> Result<Option<UserId>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let author: Option<Uuid> = recipes::table
            .find(id.get())
            .select(recipes::author_id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(author.map(UserId::from_uuid))
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count: i64 = filtered(filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows: Vec<RecipeRow> = filtered(filter)
            .order((recipes::created_at.desc(), recipes::id.desc()))
            .offset(i64::try_from(page.offset()).unwrap_or(i64::MAX))
            .limit(i64::from(page.limit()))
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let items = hydrate(&mut conn, rows).await.map_err(map_diesel_error)?;
        Ok(Page {
            count: u64::try_from(count).unwrap_or_default(),
            items,
            request: page,
        })
    }

    async fn create(
        &self,
        author: &UserId,
        recipe: &ValidatedRecipe,
    ) -> Result<RecipeId, RecipeRepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let author_id = *author.as_uuid();
        let outcome: Result<i64, WriteFailure> = conn
            .transaction(|conn| {
                async move {
                    check_catalogue(conn, recipe).await?;
                    let id: i64 = diesel::insert_into(recipes::table)
                        .values(NewRecipeRow {
                            author_id,
                            name: recipe.name(),
                            image: recipe.image().unwrap_or_default(),
                            text: recipe.text(),
                            cooking_time: recipe.cooking_time(),
                        })
                        .returning(recipes::id)
                        .get_result(conn)
                        .await?;
                    replace_links(conn, id, recipe).await?;
                    Ok(id)
                }
                .scope_boxed()
            })
            .await;
        outcome
            .map(RecipeId::new)
            .map_err(|failure| map_write_failure(None, failure))
    }

    async fn update(
        &self,
        id: RecipeId,
        recipe: &ValidatedRecipe,
    ) -> Result<(), RecipeRepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let outcome: Result<(), WriteFailure> = conn
            .transaction(|conn| {
                async move {
                    let updated = diesel::update(recipes::table.find(id.get()))
                        .set(RecipeChangeset {
                            name: recipe.name(),
                            image: recipe.image(),
                            text: recipe.text(),
                            cooking_time: recipe.cooking_time(),
                        })
                        .execute(conn)
                        .await?;
                    if updated == 0 {
                        return Err(WriteFailure::RecipeMissing);
                    }
                    check_catalogue(conn, recipe).await?;
                    replace_links(conn, id.get(), recipe).await?;
                    Ok(())
                }
                .scope_boxed()
            })
            .await;
        outcome.map_err(|failure| map_write_failure(Some(id), failure))
    }

    async fn delete(&self, id: RecipeId) -> Result<(), RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(recipes::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if deleted == 0 {
            return Err(RecipeRepositoryError::recipe_missing(id));
        }
        Ok(())
    }
}
