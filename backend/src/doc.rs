//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST path from the inbound layer, the error
//! envelope schemas from [`crate::inbound::http::schemas`] and the `Token`
//! security scheme. Response and request bodies referenced by the paths are
//! collected automatically.
//!
//! The document backs Swagger UI in debug builds and is exported by the
//! `openapi-dump` binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// Adds the `Authorization: Token <key>` scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "Token",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "Authorization",
                "Access token sent as `Token <key>`.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Foodgram API",
        description = "Recipes, favorites, shopping carts and author subscriptions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::get_recipe,
        crate::inbound::http::recipes::update_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::shopping_list::download_shopping_cart,
        crate::inbound::http::relationships::add_favorite,
        crate::inbound::http::relationships::remove_favorite,
        crate::inbound::http::relationships::add_to_cart,
        crate::inbound::http::relationships::remove_from_cart,
        crate::inbound::http::relationships::subscribe,
        crate::inbound::http::relationships::unsubscribe,
        crate::inbound::http::subscriptions::list_subscriptions,
        crate::inbound::http::catalogue::list_ingredients,
        crate::inbound::http::catalogue::get_ingredient,
        crate::inbound::http::catalogue::list_tags,
        crate::inbound::http::catalogue::get_tag,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "recipes", description = "Recipe reads, writes and the shopping list"),
        (name = "relationships", description = "Favorite, cart and follow toggles"),
        (name = "users", description = "Author subscriptions"),
        (name = "catalogue", description = "Ingredients and tags"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    #[rstest]
    fn error_schema_has_the_envelope_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let RefOr::T(Schema::Object(error)) = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema")
        else {
            panic!("expected Object schema");
        };
        for field in ["code", "message", "traceId", "details"] {
            assert!(error.properties.contains_key(field), "missing '{field}'");
        }
    }

    #[rstest]
    #[case("/api/v1/recipes")]
    #[case("/api/v1/recipes/download_shopping_cart")]
    #[case("/api/v1/recipes/{id}/favorite")]
    #[case("/api/v1/recipes/{id}/shopping_cart")]
    #[case("/api/v1/users/{id}/subscribe")]
    #[case("/api/v1/users/subscriptions")]
    #[case("/api/v1/tags/{id}")]
    #[case("/health/ready")]
    fn documents_every_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn registers_the_token_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("Token"));
    }
}
