//! Port for listing the authors a user follows.

use async_trait::async_trait;

use crate::domain::{Page, PageRequest, RecipesPreview, Subscription, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by subscription repository adapters.
    pub enum SubscriptionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "subscription repository connection failed: {message}",
        /// The lookup failed.
        Query { message: String } =>
            "subscription repository query failed: {message}",
    }
}

/// Port for the subscriptions read model.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Authors followed by `follower`, ordered by username.
    async fn followed_authors(
        &self,
        follower: &UserId,
        page: PageRequest,
        preview: RecipesPreview,
    ) -> Result<Page<Subscription>, SubscriptionRepositoryError>;

    /// A single author with their recipe preview, or `None` if the author
    /// does not exist.
    async fn author(
        &self,
        author: &UserId,
        preview: RecipesPreview,
    ) -> Result<Option<Subscription>, SubscriptionRepositoryError>;
}

/// Fixture implementation with no authors.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSubscriptionRepository;

#[async_trait]
impl SubscriptionRepository for FixtureSubscriptionRepository {
    async fn followed_authors(
        &self,
        _follower: &UserId,
        page: PageRequest,
        _preview: RecipesPreview,
    ) -> Result<Page<Subscription>, SubscriptionRepositoryError> {
        Ok(Page {
            count: 0,
            items: Vec::new(),
            request: page,
        })
    }

    async fn author(
        &self,
        _author: &UserId,
        _preview: RecipesPreview,
    ) -> Result<Option<Subscription>, SubscriptionRepositoryError> {
        Ok(None)
    }
}
