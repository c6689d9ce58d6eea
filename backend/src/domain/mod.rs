//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed entities for recipes and the per-user
//! relationship sets built on them, plus the services implementing the
//! driving ports. Nothing here knows about HTTP or SQL.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Relationship: a favorite, cart or follow row.
//! - RecipeDraft / ValidatedRecipe: the recipe write model.
//! - RecipeView: the recipe read model.
//! - ShoppingList: the aggregated cart.

pub mod error;
pub mod limits;
pub mod pagination;
pub mod ports;
pub mod recipe;
pub mod recipe_draft;
mod recipe_service;
pub mod relationship;
mod relationship_service;
pub mod shopping_list;
mod shopping_list_service;
pub mod subscription;
mod subscription_service;
pub mod trace_id;
pub mod user;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::limits::{
    Bounds, DEFAULT_MAX_VALUE, DEFAULT_MIN_VALUE, DEFAULT_NAME_MAX_LENGTH, RecipeLimits,
    RecipeLimitsError,
};
pub use self::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageRequest, PageRequestError};
pub use self::recipe::{
    Ingredient, IngredientAmount, IngredientId, Recipe, RecipeFields, RecipeFilter, RecipeFlags,
    RecipeId, RecipeSummary, RecipeView, Tag, TagId,
};
pub use self::recipe_draft::{
    DraftIngredient, DraftMode, RecipeDraft, RecipeValidationError, ValidatedRecipe,
};
pub use self::recipe_service::RecipeService;
pub use self::relationship::{Relationship, RelationshipKind};
pub use self::relationship_service::RelationshipService;
pub use self::shopping_list::{
    SHOPPING_LIST_FILENAME, SHOPPING_LIST_HEADER, ShoppingList, ShoppingListLine,
};
pub use self::shopping_list_service::ShoppingListService;
pub use self::subscription::{RecipesPreview, Subscription};
pub use self::subscription_service::SubscriptionService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{AuthorView, User, UserId, UserIdError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use foodgram::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
