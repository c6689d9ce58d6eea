//! Driving port for the consolidated shopping list.

use async_trait::async_trait;

use crate::domain::{Error, ShoppingList, UserId};

/// Compute a user's shopping list on demand.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShoppingListQuery: Send + Sync {
    async fn shopping_list(&self, user: &UserId) -> Result<ShoppingList, Error>;
}

/// Fixture implementation returning an empty list.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureShoppingListQuery;

#[async_trait]
impl ShoppingListQuery for FixtureShoppingListQuery {
    async fn shopping_list(&self, _user: &UserId) -> Result<ShoppingList, Error> {
        Ok(ShoppingList::default())
    }
}
