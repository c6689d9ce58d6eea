//! Favorite, shopping cart and follow toggles.
//!
//! ```text
//! POST   /api/v1/recipes/{id}/favorite
//! DELETE /api/v1/recipes/{id}/favorite
//! POST   /api/v1/recipes/{id}/shopping_cart
//! DELETE /api/v1/recipes/{id}/shopping_cart
//! POST   /api/v1/users/{id}/subscribe?recipes_limit
//! DELETE /api/v1/users/{id}/subscribe
//! ```
//!
//! Adding answers `201` with a projection of the target; removing answers
//! `204`. Duplicate adds and removals of absent rows are `400`.

use actix_web::{HttpResponse, delete, post, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{RecipeId, Relationship, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::recipes_dto::RecipeSummaryResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::subscriptions::SubscriptionResponse;
use crate::inbound::http::validation::{FieldName, parse_user_id, recipes_preview};

/// Optional preview size for the subscription projection.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SubscribeParams {
    pub recipes_limit: Option<u32>,
}

fn author_from_path(path: web::Path<String>) -> ApiResult<UserId> {
    parse_user_id(&path.into_inner(), FieldName::new("id"))
}

async fn recipe_created(state: &HttpState, recipe: RecipeId) -> ApiResult<HttpResponse> {
    let summary = state.recipes_query.summary(recipe).await?;
    Ok(HttpResponse::Created().json(RecipeSummaryResponse::from(summary)))
}

/// Add a recipe to the caller's favorites.
#[utoipa::path(
    post,
    path = "/api/v1/recipes/{id}/favorite",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 201, description = "Added to favorites", body = RecipeSummaryResponse),
        (status = 400, description = "Already in favorites", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Recipe not found", body = ErrorSchema)
    ),
    tags = ["relationships"],
    operation_id = "addFavorite",
    security(("Token" = []))
)]
#[post("/recipes/{id}/favorite")]
pub async fn add_favorite(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user = auth.require_user_id()?;
    let recipe = RecipeId::new(path.into_inner());
    state
        .relationships
        .add(&Relationship::Favorite { user, recipe })
        .await?;
    recipe_created(&state, recipe).await
}

/// Remove a recipe from the caller's favorites.
#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}/favorite",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Removed from favorites"),
        (status = 400, description = "Not in favorites", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Recipe not found", body = ErrorSchema)
    ),
    tags = ["relationships"],
    operation_id = "removeFavorite",
    security(("Token" = []))
)]
#[delete("/recipes/{id}/favorite")]
pub async fn remove_favorite(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user = auth.require_user_id()?;
    let recipe = RecipeId::new(path.into_inner());
    state
        .relationships
        .remove(&Relationship::Favorite { user, recipe })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Add a recipe to the caller's shopping cart.
#[utoipa::path(
    post,
    path = "/api/v1/recipes/{id}/shopping_cart",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 201, description = "Added to the cart", body = RecipeSummaryResponse),
        (status = 400, description = "Already in the cart", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Recipe not found", body = ErrorSchema)
    ),
    tags = ["relationships"],
    operation_id = "addToCart",
    security(("Token" = []))
)]
#[post("/recipes/{id}/shopping_cart")]
pub async fn add_to_cart(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user = auth.require_user_id()?;
    let recipe = RecipeId::new(path.into_inner());
    state
        .relationships
        .add(&Relationship::ShoppingCart { user, recipe })
        .await?;
    recipe_created(&state, recipe).await
}

/// Remove a recipe from the caller's shopping cart.
#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}/shopping_cart",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Removed from the cart"),
        (status = 400, description = "Not in the cart", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Recipe not found", body = ErrorSchema)
    ),
    tags = ["relationships"],
    operation_id = "removeFromCart",
    security(("Token" = []))
)]
#[delete("/recipes/{id}/shopping_cart")]
pub async fn remove_from_cart(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user = auth.require_user_id()?;
    let recipe = RecipeId::new(path.into_inner());
    state
        .relationships
        .remove(&Relationship::ShoppingCart { user, recipe })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Follow an author.
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/subscribe",
    params(
        ("id" = String, Path, format = Uuid, description = "Author id"),
        SubscribeParams
    ),
    responses(
        (status = 201, description = "Subscribed", body = SubscriptionResponse),
        (status = 400, description = "Already subscribed or self-follow", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Author not found", body = ErrorSchema)
    ),
    tags = ["relationships"],
    operation_id = "subscribe",
    security(("Token" = []))
)]
#[post("/users/{id}/subscribe")]
pub async fn subscribe(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<String>,
    params: web::Query<SubscribeParams>,
) -> ApiResult<HttpResponse> {
    let follower = auth.require_user_id()?;
    let author = author_from_path(path)?;
    state
        .relationships
        .add(&Relationship::Follow { follower, author })
        .await?;
    let subscription = state
        .subscriptions
        .subscription(&author, recipes_preview(params.recipes_limit))
        .await?;
    Ok(HttpResponse::Created().json(SubscriptionResponse::from(subscription)))
}

/// Stop following an author.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}/subscribe",
    params(("id" = String, Path, format = Uuid, description = "Author id")),
    responses(
        (status = 204, description = "Unsubscribed"),
        (status = 400, description = "Not subscribed", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Author not found", body = ErrorSchema)
    ),
    tags = ["relationships"],
    operation_id = "unsubscribe",
    security(("Token" = []))
)]
#[delete("/users/{id}/subscribe")]
pub async fn unsubscribe(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let follower = auth.require_user_id()?;
    let author = author_from_path(path)?;
    state
        .relationships
        .remove(&Relationship::Follow { follower, author })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "relationships_tests.rs"]
mod tests;
