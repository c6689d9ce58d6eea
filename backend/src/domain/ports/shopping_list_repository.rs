//! Port for aggregating ingredient totals across a user's cart.

use async_trait::async_trait;

use crate::domain::{ShoppingListLine, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by shopping list repository adapters.
    pub enum ShoppingListRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "shopping list repository connection failed: {message}",
        /// The aggregation query failed.
        Query { message: String } =>
            "shopping list repository query failed: {message}",
    }
}

/// Port computing per-ingredient totals for every recipe in a user's cart.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShoppingListRepository: Send + Sync {
    /// Group the cart's ingredient amounts by ingredient and sum them.
    ///
    /// Lines are ordered by ingredient id ascending. An empty cart yields an
    /// empty vector.
    async fn cart_totals(
        &self,
        user: &UserId,
    ) -> Result<Vec<ShoppingListLine>, ShoppingListRepositoryError>;
}

/// Fixture implementation whose carts are always empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureShoppingListRepository;

#[async_trait]
impl ShoppingListRepository for FixtureShoppingListRepository {
    async fn cart_totals(
        &self,
        _user: &UserId,
    ) -> Result<Vec<ShoppingListLine>, ShoppingListRepositoryError> {
        Ok(Vec::new())
    }
}
