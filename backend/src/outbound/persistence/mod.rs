//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the domain repository
//! ports backed by PostgreSQL via Diesel, with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel rows and domain types. Business rules live in the domain
//!   services.
//! - **Internal models**: Row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Constraints as the last word**: uniqueness, foreign keys and checks
//!   are enforced by the schema; adapters translate violations into port
//!   errors through `diesel_basic_error_mapping`.
//!
//! # Example
//!
//! ```no_run
//! use foodgram::outbound::persistence::{DbPool, DieselRecipeRepository, PoolConfig};
//!
//! # async fn demo() -> Result<(), foodgram::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/foodgram")).await?;
//! let recipes = DieselRecipeRepository::new(pool);
//! # let _ = recipes;
//! # Ok(())
//! # }
//! ```

mod diesel_access_token_repository;
mod diesel_basic_error_mapping;
mod diesel_catalogue_repository;
mod diesel_recipe_repository;
mod diesel_relationship_repository;
mod diesel_shopping_list_repository;
mod diesel_subscription_repository;
mod migrate;
mod models;
mod pool;
mod schema;

pub use diesel_access_token_repository::DieselAccessTokenRepository;
pub use diesel_catalogue_repository::DieselCatalogueRepository;
pub use diesel_recipe_repository::DieselRecipeRepository;
pub use diesel_relationship_repository::DieselRelationshipRepository;
pub use diesel_shopping_list_repository::DieselShoppingListRepository;
pub use diesel_subscription_repository::DieselSubscriptionRepository;
pub use migrate::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
