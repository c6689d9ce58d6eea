//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`) are what inbound adapters call.
//! Driven ports (`*Repository`) are what the domain services call; each
//! carries a typed error so adapters map store failures into predictable
//! variants.

mod macros;
pub(crate) use macros::define_port_error;

mod access_token_repository;
mod catalogue_repository;
mod recipe_command;
mod recipe_query;
mod recipe_repository;
mod relationship_command;
mod relationship_query;
mod relationship_repository;
mod shopping_list_query;
mod shopping_list_repository;
mod subscription_repository;
mod subscriptions_query;

#[cfg(test)]
pub use access_token_repository::MockAccessTokenRepository;
pub use access_token_repository::{
    AccessTokenRepository, AccessTokenRepositoryError, FixtureAccessTokenRepository,
};
pub use catalogue_repository::{
    CatalogueRepository, CatalogueRepositoryError, FixtureCatalogueRepository,
};
#[cfg(test)]
pub use recipe_command::MockRecipeCommand;
pub use recipe_command::{FixtureRecipeCommand, RecipeCommand};
#[cfg(test)]
pub use recipe_query::MockRecipeQuery;
pub use recipe_query::{FixtureRecipeQuery, RecipeQuery};
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{FixtureRecipeRepository, RecipeRepository, RecipeRepositoryError};
#[cfg(test)]
pub use relationship_command::MockRelationshipCommand;
pub use relationship_command::{FixtureRelationshipCommand, RelationshipCommand};
#[cfg(test)]
pub use relationship_query::MockRelationshipQuery;
pub use relationship_query::RelationshipQuery;
#[cfg(test)]
pub use relationship_repository::MockRelationshipRepository;
pub use relationship_repository::{
    FixtureRelationshipRepository, RelationshipRepository, RelationshipRepositoryError,
};
#[cfg(test)]
pub use shopping_list_query::MockShoppingListQuery;
pub use shopping_list_query::{FixtureShoppingListQuery, ShoppingListQuery};
#[cfg(test)]
pub use shopping_list_repository::MockShoppingListRepository;
pub use shopping_list_repository::{
    FixtureShoppingListRepository, ShoppingListRepository, ShoppingListRepositoryError,
};
#[cfg(test)]
pub use subscription_repository::MockSubscriptionRepository;
pub use subscription_repository::{
    FixtureSubscriptionRepository, SubscriptionRepository, SubscriptionRepositoryError,
};
#[cfg(test)]
pub use subscriptions_query::MockSubscriptionsQuery;
pub use subscriptions_query::{FixtureSubscriptionsQuery, SubscriptionsQuery};
