//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccessTokenRepository, CatalogueRepository, FixtureAccessTokenRepository,
    FixtureCatalogueRepository, FixtureRecipeCommand, FixtureRecipeQuery,
    FixtureRelationshipCommand, FixtureShoppingListQuery, FixtureSubscriptionsQuery,
    RecipeCommand, RecipeQuery, RelationshipCommand, ShoppingListQuery, SubscriptionsQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub recipes: Arc<dyn RecipeCommand>,
    pub recipes_query: Arc<dyn RecipeQuery>,
    pub relationships: Arc<dyn RelationshipCommand>,
    pub shopping_list: Arc<dyn ShoppingListQuery>,
    pub subscriptions: Arc<dyn SubscriptionsQuery>,
    pub catalogue: Arc<dyn CatalogueRepository>,
    pub access_tokens: Arc<dyn AccessTokenRepository>,
}

impl HttpState {
    /// State backed entirely by fixture ports.
    ///
    /// Used when no database is configured and as the baseline for handler
    /// tests, which swap in the ports they exercise.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use foodgram::domain::ports::FixtureCatalogueRepository;
    /// use foodgram::inbound::http::state::HttpState;
    ///
    /// let state = HttpState {
    ///     catalogue: Arc::new(FixtureCatalogueRepository),
    ///     ..HttpState::fixtures()
    /// };
    /// let _tokens = state.access_tokens.clone();
    /// ```
    #[must_use]
    pub fn fixtures() -> Self {
        Self {
            recipes: Arc::new(FixtureRecipeCommand),
            recipes_query: Arc::new(FixtureRecipeQuery),
            relationships: Arc::new(FixtureRelationshipCommand),
            shopping_list: Arc::new(FixtureShoppingListQuery),
            subscriptions: Arc::new(FixtureSubscriptionsQuery),
            catalogue: Arc::new(FixtureCatalogueRepository),
            access_tokens: Arc::new(FixtureAccessTokenRepository),
        }
    }
}
