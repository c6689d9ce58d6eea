//! Subscriptions read-model service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    SubscriptionRepository, SubscriptionRepositoryError, SubscriptionsQuery,
};
use crate::domain::{Error, Page, PageRequest, RecipesPreview, Subscription, UserId};

fn map_repository_error(error: SubscriptionRepositoryError) -> Error {
    match error {
        SubscriptionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("subscription repository unavailable: {message}"))
        }
        SubscriptionRepositoryError::Query { message } => {
            Error::internal(format!("subscription repository error: {message}"))
        }
    }
}

/// Lists followed authors with a bounded preview of their recipes.
#[derive(Clone)]
pub struct SubscriptionService<R> {
    subscription_repo: Arc<R>,
}

impl<R> SubscriptionService<R> {
    /// Create a new service over the subscription repository.
    pub fn new(subscription_repo: Arc<R>) -> Self {
        Self { subscription_repo }
    }
}

#[async_trait]
impl<R> SubscriptionsQuery for SubscriptionService<R>
where
    R: SubscriptionRepository,
{
    async fn subscriptions(
        &self,
        follower: &UserId,
        page: PageRequest,
        preview: RecipesPreview,
    ) -> Result<Page<Subscription>, Error> {
        self.subscription_repo
            .followed_authors(follower, page, preview)
            .await
            .map_err(map_repository_error)
    }

    async fn subscription(
        &self,
        author: &UserId,
        preview: RecipesPreview,
    ) -> Result<Subscription, Error> {
        self.subscription_repo
            .author(author, preview)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("user {author} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockSubscriptionRepository;
    use crate::domain::{ErrorCode, User};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn passes_preview_limit_to_the_store() {
        let follower = UserId::random();
        let mut repo = MockSubscriptionRepository::new();
        repo.expect_followed_authors()
            .withf(|_, page: &PageRequest, preview: &RecipesPreview| {
                page.page() == 2 && preview.limit() == Some(3)
            })
            .times(1)
            .return_once(|_, page, _| {
                Ok(Page {
                    count: 6,
                    items: Vec::new(),
                    request: page,
                })
            });
        let service = SubscriptionService::new(Arc::new(repo));
        let page = PageRequest::try_new(Some(2), None).expect("page");

        let result = service
            .subscriptions(&follower, page, RecipesPreview::limited(3))
            .await
            .expect("subscriptions");

        assert_eq!(result.count, 6);
        assert_eq!(result.previous(), Some(1));
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_author_is_not_found() {
        let mut repo = MockSubscriptionRepository::new();
        repo.expect_author().times(1).return_once(|_, _| Ok(None));
        let service = SubscriptionService::new(Arc::new(repo));

        let error = service
            .subscription(&UserId::random(), RecipesPreview::unlimited())
            .await
            .expect_err("unknown author");

        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn known_author_is_returned() {
        let author = UserId::random();
        let mut repo = MockSubscriptionRepository::new();
        repo.expect_author().times(1).return_once(move |_, _| {
            Ok(Some(Subscription {
                author: User {
                    id: author,
                    email: "chef@example.com".to_owned(),
                    username: "chef".to_owned(),
                    first_name: "Grace".to_owned(),
                    last_name: "Chef".to_owned(),
                },
                recipes: Vec::new(),
                recipes_count: 0,
            }))
        });
        let service = SubscriptionService::new(Arc::new(repo));

        let subscription = service
            .subscription(&author, RecipesPreview::unlimited())
            .await
            .expect("author");

        assert_eq!(subscription.author.id, author);
    }
}
