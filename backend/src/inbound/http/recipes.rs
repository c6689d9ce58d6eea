//! Recipe read and write endpoints.
//!
//! ```text
//! GET    /api/v1/recipes?page&limit&author&tags&is_favorited&is_in_shopping_cart
//! POST   /api/v1/recipes
//! GET    /api/v1/recipes/{id}
//! PATCH  /api/v1/recipes/{id}
//! DELETE /api/v1/recipes/{id}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, web};

use crate::domain::RecipeId;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::pagination::Paginated;
use crate::inbound::http::recipes_dto::{RecipeListParams, RecipeResponse, RecipeWriteRequest};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// List recipes newest first.
#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    params(RecipeListParams),
    responses(
        (status = 200, description = "Recipes page", body = Paginated<RecipeResponse>),
        (status = 400, description = "Invalid query", body = ErrorSchema),
        (status = 401, description = "Invalid token", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes",
    security([], ("Token" = []))
)]
#[get("/recipes")]
pub async fn list_recipes(
    state: web::Data<HttpState>,
    auth: AuthContext,
    request: HttpRequest,
) -> ApiResult<web::Json<Paginated<RecipeResponse>>> {
    let params = RecipeListParams::from_query_string(request.query_string())?;
    let page = params.page_request()?;
    let viewer = auth.viewer();
    let recipes = state
        .recipes_query
        .list(viewer, params.filter_for(viewer), page)
        .await?;
    Ok(web::Json(Paginated::from_page(recipes, RecipeResponse::from)))
}

/// Create a recipe authored by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/recipes",
    request_body = RecipeWriteRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeResponse),
        (status = 400, description = "Invalid recipe", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown tag or ingredient", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe",
    security(("Token" = []))
)]
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    auth: AuthContext,
    payload: web::Json<RecipeWriteRequest>,
) -> ApiResult<HttpResponse> {
    let author = auth.require_user_id()?;
    let view = state
        .recipes
        .create(&author, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(RecipeResponse::from(view)))
}

/// Fetch one recipe.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe", body = RecipeResponse),
        (status = 401, description = "Invalid token", body = ErrorSchema),
        (status = 404, description = "Recipe not found", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "getRecipe",
    security([], ("Token" = []))
)]
#[get("/recipes/{id}")]
pub async fn get_recipe(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<RecipeResponse>> {
    let id = RecipeId::new(path.into_inner());
    let view = state.recipes_query.get(auth.viewer(), id).await?;
    Ok(web::Json(view.into()))
}

/// Replace a recipe's fields, tags and ingredient amounts.
#[utoipa::path(
    patch,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    request_body = RecipeWriteRequest,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeResponse),
        (status = 400, description = "Invalid recipe", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Recipe, tag or ingredient not found", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "updateRecipe",
    security(("Token" = []))
)]
#[patch("/recipes/{id}")]
pub async fn update_recipe(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<i64>,
    payload: web::Json<RecipeWriteRequest>,
) -> ApiResult<web::Json<RecipeResponse>> {
    let editor = auth.require_user_id()?;
    let id = RecipeId::new(path.into_inner());
    let view = state
        .recipes
        .update(&editor, id, payload.into_inner().into())
        .await?;
    Ok(web::Json(view.into()))
}

/// Delete a recipe.
#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Recipe not found", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe",
    security(("Token" = []))
)]
#[delete("/recipes/{id}")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let editor = auth.require_user_id()?;
    state
        .recipes
        .delete(&editor, RecipeId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "recipes_tests.rs"]
mod tests;
