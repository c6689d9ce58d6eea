//! Ingredient and tag catalogue endpoints.
//!
//! ```text
//! GET /api/v1/ingredients?name
//! GET /api/v1/ingredients/{id}
//! GET /api/v1/tags
//! GET /api/v1/tags/{id}
//! ```
//!
//! Catalogue reads are public and unpaginated.

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::Error;
use crate::domain::ports::CatalogueRepositoryError;
use crate::domain::{IngredientId, TagId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::recipes_dto::{IngredientResponse, TagResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

fn map_catalogue_error(error: CatalogueRepositoryError) -> Error {
    match error {
        CatalogueRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("catalogue unavailable: {message}"))
        }
        CatalogueRepositoryError::Query { message } => {
            Error::internal(format!("catalogue lookup failed: {message}"))
        }
    }
}

/// Ingredient search parameters.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IngredientSearch {
    /// Case-insensitive name prefix.
    pub name: Option<String>,
}

/// List ingredients, optionally by name prefix.
#[utoipa::path(
    get,
    path = "/api/v1/ingredients",
    params(IngredientSearch),
    responses(
        (status = 200, description = "Ingredients", body = Vec<IngredientResponse>),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "listIngredients",
    security([])
)]
#[get("/ingredients")]
pub async fn list_ingredients(
    state: web::Data<HttpState>,
    search: web::Query<IngredientSearch>,
) -> ApiResult<web::Json<Vec<IngredientResponse>>> {
    let prefix = search
        .into_inner()
        .name
        .filter(|name| !name.trim().is_empty());
    let ingredients = state
        .catalogue
        .ingredients(prefix)
        .await
        .map_err(map_catalogue_error)?;
    Ok(web::Json(
        ingredients.into_iter().map(IngredientResponse::from).collect(),
    ))
}

/// Fetch one ingredient.
#[utoipa::path(
    get,
    path = "/api/v1/ingredients/{id}",
    params(("id" = i64, Path, description = "Ingredient id")),
    responses(
        (status = 200, description = "Ingredient", body = IngredientResponse),
        (status = 404, description = "Ingredient not found", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "getIngredient",
    security([])
)]
#[get("/ingredients/{id}")]
pub async fn get_ingredient(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<IngredientResponse>> {
    let id = IngredientId::new(path.into_inner());
    let ingredient = state
        .catalogue
        .ingredient(id)
        .await
        .map_err(map_catalogue_error)?
        .ok_or_else(|| Error::not_found(format!("ingredient {id} not found")))?;
    Ok(web::Json(ingredient.into()))
}

/// List every tag.
#[utoipa::path(
    get,
    path = "/api/v1/tags",
    responses(
        (status = 200, description = "Tags", body = Vec<TagResponse>),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "listTags",
    security([])
)]
#[get("/tags")]
pub async fn list_tags(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<TagResponse>>> {
    let tags = state.catalogue.tags().await.map_err(map_catalogue_error)?;
    Ok(web::Json(tags.into_iter().map(TagResponse::from).collect()))
}

/// Fetch one tag.
#[utoipa::path(
    get,
    path = "/api/v1/tags/{id}",
    params(("id" = i64, Path, description = "Tag id")),
    responses(
        (status = 200, description = "Tag", body = TagResponse),
        (status = 404, description = "Tag not found", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "getTag",
    security([])
)]
#[get("/tags/{id}")]
pub async fn get_tag(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<TagResponse>> {
    let id = TagId::new(path.into_inner());
    let tag = state
        .catalogue
        .tag(id)
        .await
        .map_err(map_catalogue_error)?
        .ok_or_else(|| Error::not_found(format!("tag {id} not found")))?;
    Ok(web::Json(tag.into()))
}
