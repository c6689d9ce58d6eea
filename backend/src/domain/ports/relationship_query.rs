//! Driving port for viewer-specific membership flags.

use async_trait::async_trait;

use crate::domain::{Error, RecipeId, UserId};

/// Single-item membership tests against the relationship sets.
///
/// Every method returns `false` for an anonymous viewer without consulting
/// the store. HTTP read models do not go through this port: they decorate
/// whole pages via `RelationshipRepository::recipe_flags` and
/// `followed_among`, which answer the same membership question in one query.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelationshipQuery: Send + Sync {
    async fn is_favorited(&self, recipe: RecipeId, viewer: Option<UserId>) -> Result<bool, Error>;

    async fn is_in_cart(&self, recipe: RecipeId, viewer: Option<UserId>) -> Result<bool, Error>;

    async fn is_subscribed(&self, author: UserId, viewer: Option<UserId>) -> Result<bool, Error>;
}
