//! Shopping list aggregation service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{ShoppingListQuery, ShoppingListRepository, ShoppingListRepositoryError};
use crate::domain::{Error, ShoppingList, UserId};

fn map_repository_error(error: ShoppingListRepositoryError) -> Error {
    match error {
        ShoppingListRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("shopping list repository unavailable: {message}"))
        }
        ShoppingListRepositoryError::Query { message } => {
            Error::internal(format!("shopping list repository error: {message}"))
        }
    }
}

/// Computes a user's shopping list from their cart on every call.
#[derive(Clone)]
pub struct ShoppingListService<R> {
    shopping_list_repo: Arc<R>,
}

impl<R> ShoppingListService<R> {
    /// Create a new service over the aggregation repository.
    pub fn new(shopping_list_repo: Arc<R>) -> Self {
        Self { shopping_list_repo }
    }
}

#[async_trait]
impl<R> ShoppingListQuery for ShoppingListService<R>
where
    R: ShoppingListRepository,
{
    async fn shopping_list(&self, user: &UserId) -> Result<ShoppingList, Error> {
        let lines = self
            .shopping_list_repo
            .cart_totals(user)
            .await
            .map_err(map_repository_error)?;
        Ok(ShoppingList::new(lines))
    }
}
