//! Subscriptions read endpoint.
//!
//! ```text
//! GET /api/v1/users/subscriptions?page&limit&recipes_limit
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Subscription;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::pagination::Paginated;
use crate::inbound::http::recipes_dto::{RecipeSummaryResponse, UserResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{page_request, recipes_preview};

/// Followed author with a preview of their recipes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct SubscriptionResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    /// Always `true`: the caller follows every listed author.
    pub is_subscribed: bool,
    pub recipes: Vec<RecipeSummaryResponse>,
    pub recipes_count: u64,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(subscription: Subscription) -> Self {
        Self {
            user: subscription.author.into(),
            is_subscribed: true,
            recipes: subscription
                .recipes
                .into_iter()
                .map(RecipeSummaryResponse::from)
                .collect(),
            recipes_count: subscription.recipes_count,
        }
    }
}

/// Query parameters for `GET /api/v1/users/subscriptions`.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SubscriptionListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Recipes to preview per author; all of them when omitted.
    pub recipes_limit: Option<u32>,
}

/// Authors the caller follows, ordered by username.
#[utoipa::path(
    get,
    path = "/api/v1/users/subscriptions",
    params(SubscriptionListParams),
    responses(
        (status = 200, description = "Followed authors", body = Paginated<SubscriptionResponse>),
        (status = 400, description = "Invalid query", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listSubscriptions",
    security(("Token" = []))
)]
#[get("/users/subscriptions")]
pub async fn list_subscriptions(
    state: web::Data<HttpState>,
    auth: AuthContext,
    params: web::Query<SubscriptionListParams>,
) -> ApiResult<web::Json<Paginated<SubscriptionResponse>>> {
    let follower = auth.require_user_id()?;
    let page = page_request(params.page, params.limit)?;
    let subscriptions = state
        .subscriptions
        .subscriptions(&follower, page, recipes_preview(params.recipes_limit))
        .await?;
    Ok(web::Json(Paginated::from_page(
        subscriptions,
        SubscriptionResponse::from,
    )))
}
