//! Shopping list download.
//!
//! ```text
//! GET /api/v1/recipes/download_shopping_cart
//! ```

use actix_web::http::header::{
    CACHE_CONTROL, CONTENT_DISPOSITION, ContentDisposition, ContentType, DispositionParam,
    DispositionType,
};
use actix_web::{HttpResponse, get, web};

use crate::domain::SHOPPING_LIST_FILENAME;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

fn attachment() -> ContentDisposition {
    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(SHOPPING_LIST_FILENAME.to_owned())],
    }
}

/// Download the caller's cart as a plain-text shopping list.
///
/// Amounts of the same ingredient are summed across every recipe in the
/// cart. An empty cart yields just the header line.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/download_shopping_cart",
    responses(
        (status = 200, description = "Shopping list attachment", content_type = "text/plain", body = String),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "downloadShoppingCart",
    security(("Token" = []))
)]
#[get("/recipes/download_shopping_cart")]
pub async fn download_shopping_cart(
    state: web::Data<HttpState>,
    auth: AuthContext,
) -> ApiResult<HttpResponse> {
    let user = auth.require_user_id()?;
    let list = state.shopping_list.shopping_list(&user).await?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .insert_header((CONTENT_DISPOSITION, attachment()))
        .insert_header((CACHE_CONTROL, "private, no-cache, must-revalidate"))
        .body(list.render()))
}
