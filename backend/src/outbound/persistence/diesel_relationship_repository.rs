//! PostgreSQL-backed relationship repository.
//!
//! Each mutation checks its target and touches the row inside one
//! transaction. Concurrent duplicate inserts are caught by the unique
//! constraints and come back as [`RelationshipRepositoryError::Duplicate`].

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{RelationshipRepository, RelationshipRepositoryError};
use crate::domain::{RecipeFlags, RecipeId, Relationship, UserId};

use super::diesel_basic_error_mapping::{
    StoreFailure, classify_diesel_error, map_basic_failure, pool_error_message,
};
use super::models::{NewCartEntryRow, NewFavoriteRow, NewFollowRow};
use super::pool::{DbPool, PoolError};
use super::schema::{favorites, follows, recipes, shopping_cart_entries, users};

const SELF_FOLLOW_CONSTRAINT: &str = "follows_no_self_follow";

/// Diesel-backed implementation of the relationship port.
#[derive(Clone)]
pub struct DieselRelationshipRepository {
    pool: DbPool,
}

impl DieselRelationshipRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failure inside a relationship transaction.
enum WriteFailure {
    TargetMissing,
    RowMissing,
    Diesel(diesel::result::Error),
}

impl From<diesel::result::Error> for WriteFailure {
    fn from(err: diesel::result::Error) -> Self {
        Self::Diesel(err)
    }
}

fn map_pool_error(error: PoolError) -> RelationshipRepositoryError {
    RelationshipRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> RelationshipRepositoryError {
    map_basic_failure(
        classify_diesel_error(error),
        RelationshipRepositoryError::query,
        RelationshipRepositoryError::connection,
    )
}

fn map_write_failure(
    relationship: &Relationship,
    failure: WriteFailure,
) -> RelationshipRepositoryError {
    let kind = relationship.kind();
    match failure {
        WriteFailure::TargetMissing => {
            RelationshipRepositoryError::target_missing(kind, relationship.target_label())
        }
        WriteFailure::RowMissing => RelationshipRepositoryError::missing(kind),
        WriteFailure::Diesel(err) => match classify_diesel_error(err) {
            StoreFailure::Unique { .. } => RelationshipRepositoryError::duplicate(kind),
            failure if failure.is_constraint(SELF_FOLLOW_CONSTRAINT) => {
                RelationshipRepositoryError::SelfReference
            }
            // The target was deleted between the existence check and the insert.
            StoreFailure::ForeignKey { .. } => {
                RelationshipRepositoryError::target_missing(kind, relationship.target_label())
            }
            failure => map_basic_failure(
                failure,
                RelationshipRepositoryError::query,
                RelationshipRepositoryError::connection,
            ),
        },
    }
}

async fn target_exists(
    conn: &mut AsyncPgConnection,
    relationship: &Relationship,
) -> QueryResult<bool> {
    match *relationship {
        Relationship::Favorite { recipe, .. } | Relationship::ShoppingCart { recipe, .. } => {
            diesel::select(exists(recipes::table.filter(recipes::id.eq(recipe.get()))))
                .get_result(conn)
                .await
        }
        Relationship::Follow { author, .. } => {
            diesel::select(exists(users::table.filter(users::id.eq(*author.as_uuid()))))
                .get_result(conn)
                .await
        }
    }
}

async fn insert_row(conn: &mut AsyncPgConnection, relationship: &Relationship) -> QueryResult<usize> {
    match *relationship {
        Relationship::Favorite { user, recipe } => {
            diesel::insert_into(favorites::table)
                .values(NewFavoriteRow {
                    user_id: *user.as_uuid(),
                    recipe_id: recipe.get(),
                })
                .execute(conn)
                .await
        }
        Relationship::ShoppingCart { user, recipe } => {
            diesel::insert_into(shopping_cart_entries::table)
                .values(NewCartEntryRow {
                    user_id: *user.as_uuid(),
                    recipe_id: recipe.get(),
                })
                .execute(conn)
                .await
        }
        Relationship::Follow { follower, author } => {
            diesel::insert_into(follows::table)
                .values(NewFollowRow {
                    follower_id: *follower.as_uuid(),
                    author_id: *author.as_uuid(),
                })
                .execute(conn)
                .await
        }
    }
}

async fn delete_row(conn: &mut AsyncPgConnection, relationship: &Relationship) -> QueryResult<usize> {
    match *relationship {
        Relationship::Favorite { user, recipe } => {
            diesel::delete(
                favorites::table
                    .filter(favorites::user_id.eq(*user.as_uuid()))
                    .filter(favorites::recipe_id.eq(recipe.get())),
            )
            .execute(conn)
            .await
        }
        Relationship::ShoppingCart { user, recipe } => {
            diesel::delete(
                shopping_cart_entries::table
                    .filter(shopping_cart_entries::user_id.eq(*user.as_uuid()))
                    .filter(shopping_cart_entries::recipe_id.eq(recipe.get())),
            )
            .execute(conn)
            .await
        }
        Relationship::Follow { follower, author } => {
            diesel::delete(
                follows::table
                    .filter(follows::follower_id.eq(*follower.as_uuid()))
                    .filter(follows::author_id.eq(*author.as_uuid())),
            )
            .execute(conn)
            .await
        }
    }
}

async fn row_exists(conn: &mut AsyncPgConnection, relationship: &Relationship) -> QueryResult<bool> {
    match *relationship {
        Relationship::Favorite { user, recipe } => {
            diesel::select(exists(
                favorites::table
                    .filter(favorites::user_id.eq(*user.as_uuid()))
                    .filter(favorites::recipe_id.eq(recipe.get())),
            ))
            .get_result(conn)
            .await
        }
        Relationship::ShoppingCart { user, recipe } => {
            diesel::select(exists(
                shopping_cart_entries::table
                    .filter(shopping_cart_entries::user_id.eq(*user.as_uuid()))
                    .filter(shopping_cart_entries::recipe_id.eq(recipe.get())),
            ))
            .get_result(conn)
            .await
        }
        Relationship::Follow { follower, author } => {
            diesel::select(exists(
                follows::table
                    .filter(follows::follower_id.eq(*follower.as_uuid()))
                    .filter(follows::author_id.eq(*author.as_uuid())),
            ))
            .get_result(conn)
            .await
        }
    }
}

#[async_trait]
impl RelationshipRepository for DieselRelationshipRepository {
    async fn insert(&self, relationship: &Relationship) -> Result<(), RelationshipRepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = *relationship;
        let outcome: Result<(), WriteFailure> = conn
            .transaction(|conn| {
                async move {
                    if !target_exists(conn, &row).await? {
                        return Err(WriteFailure::TargetMissing);
                    }
                    insert_row(conn, &row).await?;
                    Ok(())
                }
                .scope_boxed()
            })
            .await;
        outcome.map_err(|failure| map_write_failure(relationship, failure))
    }

    async fn delete(&self, relationship: &Relationship) -> Result<(), RelationshipRepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = *relationship;
        let outcome: Result<(), WriteFailure> = conn
            .transaction(|conn| {
                async move {
                    if !target_exists(conn, &row).await? {
                        return Err(WriteFailure::TargetMissing);
                    }
                    if delete_row(conn, &row).await? == 0 {
                        return Err(WriteFailure::RowMissing);
                    }
                    Ok(())
                }
                .scope_boxed()
            })
            .await;
        outcome.map_err(|failure| map_write_failure(relationship, failure))
    }

    async fn contains(
        &self,
        relationship: &Relationship,
    ) -> Result<bool, RelationshipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        row_exists(&mut conn, relationship)
            .await
            .map_err(map_diesel_error)
    }

    async fn recipe_flags(
        &self,
        user: &UserId,
        recipes: &[RecipeId],
    ) -> Result<Vec<RecipeFlags>, RelationshipRepositoryError> {
        if recipes.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = recipes.iter().map(|id| id.get()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let favorited: Vec<i64> = favorites::table
            .filter(favorites::user_id.eq(*user.as_uuid()))
            .filter(favorites::recipe_id.eq_any(&ids))
            .select(favorites::recipe_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let in_cart: Vec<i64> = shopping_cart_entries::table
            .filter(shopping_cart_entries::user_id.eq(*user.as_uuid()))
            .filter(shopping_cart_entries::recipe_id.eq_any(&ids))
            .select(shopping_cart_entries::recipe_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(ids
            .iter()
            .map(|id| RecipeFlags {
                is_favorited: favorited.contains(id),
                is_in_shopping_cart: in_cart.contains(id),
            })
            .collect())
    }

    async fn followed_among(
        &self,
        follower: &UserId,
        authors: &[UserId],
    ) -> Result<Vec<UserId>, RelationshipRepositoryError> {
        if authors.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = authors.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let followed: Vec<Uuid> = follows::table
            .filter(follows::follower_id.eq(*follower.as_uuid()))
            .filter(follows::author_id.eq_any(&ids))
            .select(follows::author_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(followed.into_iter().map(UserId::from_uuid).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RelationshipKind;
    use rstest::rstest;

    fn follow() -> Relationship {
        Relationship::Follow {
            follower: UserId::random(),
            author: UserId::random(),
        }
    }

    #[rstest]
    fn missing_row_maps_to_missing() {
        let rel = follow();
        assert_eq!(
            map_write_failure(&rel, WriteFailure::RowMissing),
            RelationshipRepositoryError::missing(RelationshipKind::Follow)
        );
    }

    #[rstest]
    fn missing_target_names_the_target() {
        let rel = Relationship::ShoppingCart {
            user: UserId::random(),
            recipe: RecipeId::new(8),
        };
        assert_eq!(
            map_write_failure(&rel, WriteFailure::TargetMissing),
            RelationshipRepositoryError::target_missing(RelationshipKind::ShoppingCart, "8")
        );
    }

    #[rstest]
    fn plain_diesel_failures_are_query_errors() {
        let rel = follow();
        assert!(matches!(
            map_write_failure(&rel, WriteFailure::Diesel(diesel::result::Error::NotFound)),
            RelationshipRepositoryError::Query { .. }
        ));
    }
}
