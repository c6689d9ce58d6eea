//! Explicit routing table for the `/api/v1` scope.
//!
//! Every method and path maps to exactly one handler. Commands and queries
//! are listed separately so a reader can see at a glance which routes
//! change state.

use actix_web::web;

use crate::domain::Error;

use super::catalogue::{get_ingredient, get_tag, list_ingredients, list_tags};
use super::recipes::{create_recipe, delete_recipe, get_recipe, list_recipes, update_recipe};
use super::relationships::{
    add_favorite, add_to_cart, remove_favorite, remove_from_cart, subscribe, unsubscribe,
};
use super::shopping_list::download_shopping_cart;
use super::subscriptions::list_subscriptions;

/// JSON extractor configuration turning body errors into the error envelope.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid request body: {err}")).into()
    })
}

/// Query-string extractor configuration using the error envelope.
#[must_use]
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid query string: {err}")).into()
    })
}

/// Path extractor configuration using the error envelope.
#[must_use]
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid path parameter: {err}")).into()
    })
}

/// Register the read-only routes.
///
/// The shopping list download is registered ahead of `/recipes/{id}` so the
/// literal segment wins over the path parameter.
pub fn configure_queries(cfg: &mut web::ServiceConfig) {
    cfg.service(list_recipes)
        .service(download_shopping_cart)
        .service(get_recipe)
        .service(list_subscriptions)
        .service(list_ingredients)
        .service(get_ingredient)
        .service(list_tags)
        .service(get_tag);
}

/// Register the state-changing routes.
pub fn configure_commands(cfg: &mut web::ServiceConfig) {
    cfg.service(create_recipe)
        .service(update_recipe)
        .service(delete_recipe)
        .service(add_favorite)
        .service(remove_favorite)
        .service(add_to_cart)
        .service(remove_from_cart)
        .service(subscribe)
        .service(unsubscribe);
}

/// Register every API route.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config());
    configure_queries(cfg);
    configure_commands(cfg);
}
