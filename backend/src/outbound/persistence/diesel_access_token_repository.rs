//! PostgreSQL-backed access token lookup.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::UserId;
use crate::domain::ports::{AccessTokenRepository, AccessTokenRepositoryError};

use super::diesel_basic_error_mapping::{
    classify_diesel_error, map_basic_failure, pool_error_message,
};
use super::pool::{DbPool, PoolError};
use super::schema::auth_tokens;

/// Resolves `auth_tokens.key` to the owning user.
#[derive(Clone)]
pub struct DieselAccessTokenRepository {
    pool: DbPool,
}

impl DieselAccessTokenRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AccessTokenRepositoryError {
    AccessTokenRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> AccessTokenRepositoryError {
    map_basic_failure(
        classify_diesel_error(error),
        AccessTokenRepositoryError::query,
        AccessTokenRepositoryError::connection,
    )
}

#[async_trait]
impl AccessTokenRepository for DieselAccessTokenRepository {
    async fn resolve(&self, key: &str) -> Result<Option<UserId>, AccessTokenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let user: Option<Uuid> = auth_tokens::table
            .find(key)
            .select(auth_tokens::user_id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(user.map(UserId::from_uuid))
    }
}
