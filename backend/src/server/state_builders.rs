//! Builders wiring Diesel adapters and domain services into [`HttpState`].

use std::sync::Arc;

use foodgram::domain::{
    RecipeLimits, RecipeService, RelationshipService, ShoppingListService, SubscriptionService,
};
use foodgram::inbound::http::state::HttpState;
use foodgram::outbound::persistence::{
    DbPool, DieselAccessTokenRepository, DieselCatalogueRepository, DieselRecipeRepository,
    DieselRelationshipRepository, DieselShoppingListRepository, DieselSubscriptionRepository,
};

use super::ServerConfig;

fn build_db_state(pool: &DbPool, limits: RecipeLimits) -> HttpState {
    let relationship_repo = Arc::new(DieselRelationshipRepository::new(pool.clone()));
    let recipes = Arc::new(RecipeService::new(
        Arc::new(DieselRecipeRepository::new(pool.clone())),
        relationship_repo.clone(),
        limits,
    ));
    HttpState {
        recipes: recipes.clone(),
        recipes_query: recipes,
        relationships: Arc::new(RelationshipService::new(relationship_repo)),
        shopping_list: Arc::new(ShoppingListService::new(Arc::new(
            DieselShoppingListRepository::new(pool.clone()),
        ))),
        subscriptions: Arc::new(SubscriptionService::new(Arc::new(
            DieselSubscriptionRepository::new(pool.clone()),
        ))),
        catalogue: Arc::new(DieselCatalogueRepository::new(pool.clone())),
        access_tokens: Arc::new(DieselAccessTokenRepository::new(pool.clone())),
    }
}

/// Ports backed by PostgreSQL when a pool is configured, fixtures otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => build_db_state(pool, config.limits),
        None => HttpState::fixtures(),
    }
}
