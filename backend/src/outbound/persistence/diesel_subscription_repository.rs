//! PostgreSQL-backed subscriptions read model.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{SubscriptionRepository, SubscriptionRepositoryError};
use crate::domain::{Page, PageRequest, RecipeSummary, RecipesPreview, Subscription, UserId};

use super::diesel_basic_error_mapping::{
    classify_diesel_error, map_basic_failure, pool_error_message,
};
use super::models::{RecipeRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{follows, recipes, users};

/// Diesel-backed implementation of the subscriptions port.
#[derive(Clone)]
pub struct DieselSubscriptionRepository {
    pool: DbPool,
}

impl DieselSubscriptionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SubscriptionRepositoryError {
    SubscriptionRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> SubscriptionRepositoryError {
    map_basic_failure(
        classify_diesel_error(error),
        SubscriptionRepositoryError::query,
        SubscriptionRepositoryError::connection,
    )
}

/// Newest recipes by `author`, truncated to the preview size.
async fn preview_recipes(
    conn: &mut AsyncPgConnection,
    author: Uuid,
    preview: RecipesPreview,
) -> QueryResult<Vec<RecipeSummary>> {
    let mut query = recipes::table
        .filter(recipes::author_id.eq(author))
        .order((recipes::created_at.desc(), recipes::id.desc()))
        .select(RecipeRow::as_select())
        .into_boxed();
    if let Some(limit) = preview.limit() {
        query = query.limit(i64::from(limit));
    }
    let rows: Vec<RecipeRow> = query.load(conn).await?;
    Ok(rows.iter().map(RecipeRow::summary).collect())
}

/// Build subscriptions for a set of authors, keeping their order.
async fn subscriptions_for(
    conn: &mut AsyncPgConnection,
    authors: Vec<UserRow>,
    preview: RecipesPreview,
) -> QueryResult<Vec<Subscription>> {
    let ids: Vec<Uuid> = authors.iter().map(|row| row.id).collect();
    let counts: HashMap<Uuid, i64> = recipes::table
        .filter(recipes::author_id.eq_any(&ids))
        .group_by(recipes::author_id)
        .select((recipes::author_id, count_star()))
        .load::<(Uuid, i64)>(conn)
        .await?
        .into_iter()
        .collect();

    let mut subscriptions = Vec::with_capacity(authors.len());
    for row in authors {
        let recipes = preview_recipes(conn, row.id, preview).await?;
        let recipes_count = counts
            .get(&row.id)
            .copied()
            .and_then(|count| u64::try_from(count).ok())
            .unwrap_or_default();
        subscriptions.push(Subscription {
            author: row.into(),
            recipes,
            recipes_count,
        });
    }
    Ok(subscriptions)
}

#[async_trait]
impl SubscriptionRepository for DieselSubscriptionRepository {
    async fn followed_authors(
        &self,
        follower: &UserId,
        page: PageRequest,
        preview: RecipesPreview,
    ) -> Result<Page<Subscription>, SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let follower_id = *follower.as_uuid();

        let count: i64 = follows::table
            .filter(follows::follower_id.eq(follower_id))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let authors: Vec<UserRow> = follows::table
            .inner_join(users::table.on(users::id.eq(follows::author_id)))
            .filter(follows::follower_id.eq(follower_id))
            .order((users::username, users::id))
            .offset(i64::try_from(page.offset()).unwrap_or(i64::MAX))
            .limit(i64::from(page.limit()))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let items = subscriptions_for(&mut conn, authors, preview)
            .await
            .map_err(map_diesel_error)?;
        Ok(Page {
            count: u64::try_from(count).unwrap_or_default(),
            items,
            request: page,
        })
    }

    async fn author(
        &self,
        author: &UserId,
        preview: RecipesPreview,
    ) -> Result<Option<Subscription>, SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .find(*author.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let Some(row) = row else {
            return Ok(None);
        };
        let mut found = subscriptions_for(&mut conn, vec![row], preview)
            .await
            .map_err(map_diesel_error)?;
        Ok(found.pop())
    }
}
