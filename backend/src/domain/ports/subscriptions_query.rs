//! Driving port for the subscriptions read model.

use async_trait::async_trait;

use crate::domain::{Error, Page, PageRequest, RecipesPreview, Subscription, UserId};

/// Read followed authors with a preview of their recipes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionsQuery: Send + Sync {
    /// Authors followed by `follower`.
    async fn subscriptions(
        &self,
        follower: &UserId,
        page: PageRequest,
        preview: RecipesPreview,
    ) -> Result<Page<Subscription>, Error>;

    /// One author's subscription projection; `not_found` when absent.
    async fn subscription(
        &self,
        author: &UserId,
        preview: RecipesPreview,
    ) -> Result<Subscription, Error>;
}

/// Fixture implementation with no authors.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSubscriptionsQuery;

#[async_trait]
impl SubscriptionsQuery for FixtureSubscriptionsQuery {
    async fn subscriptions(
        &self,
        _follower: &UserId,
        page: PageRequest,
        _preview: RecipesPreview,
    ) -> Result<Page<Subscription>, Error> {
        Ok(Page {
            count: 0,
            items: Vec::new(),
            request: page,
        })
    }

    async fn subscription(
        &self,
        author: &UserId,
        _preview: RecipesPreview,
    ) -> Result<Subscription, Error> {
        Err(Error::not_found(format!("user {author} not found")))
    }
}
