//! Request and response bodies for the recipe endpoints.
//!
//! The scalar recipe fields share one mapping ([`RecipeFieldsBody`]) that is
//! flattened into both the write body and the read projection.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    AuthorView, DraftIngredient, Error, Ingredient, IngredientAmount, IngredientId, PageRequest,
    RecipeDraft, RecipeFields, RecipeFilter, RecipeSummary, RecipeView, Tag, TagId, User, UserId,
};

use super::validation::{FieldName, page_request, parse_flag, parse_u32, parse_user_id};

/// Scalar recipe fields shared by requests and responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct RecipeFieldsBody {
    #[schema(example = "Pancakes")]
    pub name: String,
    /// Image reference. Required on create; omitted on update keeps the
    /// stored image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[schema(example = "Whisk, rest, fry.")]
    pub text: String,
    /// Minutes.
    #[schema(example = 20)]
    pub cooking_time: i32,
}

impl From<RecipeFields> for RecipeFieldsBody {
    fn from(fields: RecipeFields) -> Self {
        Self {
            name: fields.name,
            image: Some(fields.image),
            text: fields.text,
            cooking_time: fields.cooking_time,
        }
    }
}

/// One ingredient line in a recipe write request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct IngredientLineRequest {
    pub id: i64,
    pub amount: i32,
}

/// Body for `POST /api/v1/recipes` and `PATCH /api/v1/recipes/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct RecipeWriteRequest {
    #[serde(flatten)]
    pub fields: RecipeFieldsBody,
    pub tags: Vec<i64>,
    pub ingredients: Vec<IngredientLineRequest>,
}

impl From<RecipeWriteRequest> for RecipeDraft {
    fn from(request: RecipeWriteRequest) -> Self {
        let RecipeWriteRequest {
            fields,
            tags,
            ingredients,
        } = request;
        Self {
            name: fields.name,
            image: fields.image,
            text: fields.text,
            cooking_time: fields.cooking_time,
            tags: tags.into_iter().map(TagId::new).collect(),
            ingredients: ingredients
                .into_iter()
                .map(|line| DraftIngredient {
                    id: IngredientId::new(line.id),
                    amount: line.amount,
                })
                .collect(),
        }
    }
}

/// Tag as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct TagResponse {
    pub id: i64,
    #[schema(example = "Breakfast")]
    pub name: String,
    #[schema(example = "#E26C2D")]
    pub color: String,
    #[schema(example = "breakfast")]
    pub slug: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id.get(),
            name: tag.name,
            color: tag.color,
            slug: tag.slug,
        }
    }
}

/// Ingredient as returned by the catalogue endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct IngredientResponse {
    pub id: i64,
    #[schema(example = "flour")]
    pub name: String,
    #[schema(example = "g")]
    pub measurement_unit: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id.get(),
            name: ingredient.name,
            measurement_unit: ingredient.measurement_unit,
        }
    }
}

/// Ingredient with the amount a recipe uses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct IngredientAmountResponse {
    #[serde(flatten)]
    pub ingredient: IngredientResponse,
    pub amount: i32,
}

impl From<IngredientAmount> for IngredientAmountResponse {
    fn from(line: IngredientAmount) -> Self {
        Self {
            ingredient: line.ingredient.into(),
            amount: line.amount,
        }
    }
}

/// Public user profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(value_type = String, format = Uuid)]
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// Recipe author with the viewer's subscription state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct AuthorResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub is_subscribed: bool,
}

impl From<AuthorView> for AuthorResponse {
    fn from(author: AuthorView) -> Self {
        Self {
            user: author.user.into(),
            is_subscribed: author.is_subscribed,
        }
    }
}

/// Full recipe projection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: i64,
    pub tags: Vec<TagResponse>,
    pub author: AuthorResponse,
    pub ingredients: Vec<IngredientAmountResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    #[serde(flatten)]
    pub fields: RecipeFieldsBody,
}

impl From<RecipeView> for RecipeResponse {
    fn from(view: RecipeView) -> Self {
        Self {
            id: view.id.get(),
            tags: view.tags.into_iter().map(TagResponse::from).collect(),
            author: view.author.into(),
            ingredients: view
                .ingredients
                .into_iter()
                .map(IngredientAmountResponse::from)
                .collect(),
            is_favorited: view.flags.is_favorited,
            is_in_shopping_cart: view.flags.is_in_shopping_cart,
            fields: view.fields.into(),
        }
    }
}

/// Short recipe projection used by relationship toggles and subscriptions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct RecipeSummaryResponse {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl From<RecipeSummary> for RecipeSummaryResponse {
    fn from(summary: RecipeSummary) -> Self {
        Self {
            id: summary.id.get(),
            name: summary.name,
            image: summary.image,
            cooking_time: summary.cooking_time,
        }
    }
}

/// Query parameters accepted by `GET /api/v1/recipes`.
///
/// Parsed from the raw query string because `tags` may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecipeListParams {
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size, at most 100.
    pub limit: Option<u32>,
    /// Only recipes by this author.
    #[param(value_type = Option<String>, format = Uuid)]
    pub author: Option<UserId>,
    /// Tag slugs; a recipe matches if it carries any of them.
    pub tags: Vec<String>,
    /// `1` to list only the caller's favorites.
    #[param(value_type = Option<u8>)]
    pub is_favorited: bool,
    /// `1` to list only recipes in the caller's shopping cart.
    #[param(value_type = Option<u8>)]
    pub is_in_shopping_cart: bool,
}

impl RecipeListParams {
    /// Parse the query string; unknown parameters are ignored.
    pub fn from_query_string(query: &str) -> Result<Self, Error> {
        let mut params = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "page" => params.page = Some(parse_u32(&value, FieldName::new("page"))?),
                "limit" => params.limit = Some(parse_u32(&value, FieldName::new("limit"))?),
                "author" => {
                    params.author = Some(parse_user_id(&value, FieldName::new("author"))?);
                }
                "tags" => params.tags.push(value.into_owned()),
                "is_favorited" => {
                    params.is_favorited = parse_flag(&value, FieldName::new("is_favorited"))?;
                }
                "is_in_shopping_cart" => {
                    params.is_in_shopping_cart =
                        parse_flag(&value, FieldName::new("is_in_shopping_cart"))?;
                }
                _ => {}
            }
        }
        Ok(params)
    }

    /// Page request for these parameters.
    pub fn page_request(&self) -> Result<PageRequest, Error> {
        page_request(self.page, self.limit)
    }

    /// Listing filter for `viewer`. Membership filters need a caller and are
    /// dropped for anonymous viewers.
    #[must_use]
    pub fn filter_for(&self, viewer: Option<UserId>) -> RecipeFilter {
        RecipeFilter {
            author: self.author,
            tag_slugs: self.tags.clone(),
            favorited_by: viewer.filter(|_| self.is_favorited),
            in_cart_of: viewer.filter(|_| self.is_in_shopping_cart),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecipeId;
    use crate::inbound::http::test_utils::{sample_user, sample_view};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn write_request_flattens_fields_and_omits_image() {
        let request: RecipeWriteRequest = serde_json::from_value(json!({
            "name": "Soup",
            "text": "Boil.",
            "cooking_time": 30,
            "tags": [1],
            "ingredients": [{"id": 2, "amount": 150}]
        }))
        .expect("request parses");
        let draft = RecipeDraft::from(request);
        assert_eq!(draft.image, None);
        assert_eq!(draft.tags, vec![TagId::new(1)]);
        assert_eq!(
            draft.ingredients,
            vec![DraftIngredient {
                id: IngredientId::new(2),
                amount: 150
            }]
        );
    }

    #[rstest]
    fn list_params_collect_repeated_tags() {
        let params = RecipeListParams::from_query_string(
            "tags=breakfast&tags=dinner&page=2&is_favorited=1&unknown=x",
        )
        .expect("params parse");
        assert_eq!(params.tags, vec!["breakfast".to_owned(), "dinner".to_owned()]);
        assert_eq!(params.page, Some(2));
        assert!(params.is_favorited);
        assert!(!params.is_in_shopping_cart);
    }

    #[rstest]
    fn membership_filters_need_a_viewer() {
        let params = RecipeListParams {
            is_favorited: true,
            is_in_shopping_cart: true,
            ..RecipeListParams::default()
        };
        let anonymous = params.filter_for(None);
        assert_eq!(anonymous.favorited_by, None);
        assert_eq!(anonymous.in_cart_of, None);

        let viewer = UserId::random();
        let filter = params.filter_for(Some(viewer));
        assert_eq!(filter.favorited_by, Some(viewer));
        assert_eq!(filter.in_cart_of, Some(viewer));
    }

    #[rstest]
    fn bad_author_ids_are_rejected() {
        let err = RecipeListParams::from_query_string("author=bob").expect_err("rejected");
        assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn recipe_response_flattens_author_ingredients_and_fields() {
        let author: UserId = "11111111-1111-1111-1111-111111111111"
            .parse()
            .expect("valid id");
        let view = sample_view(
            9,
            sample_user(author, "cook"),
            crate::domain::RecipeFlags {
                is_favorited: true,
                is_in_shopping_cart: false,
            },
        );
        insta::assert_json_snapshot!(RecipeResponse::from(view), @r##"
        {
          "id": 9,
          "tags": [
            {
              "id": 1,
              "name": "Breakfast",
              "color": "#E26C2D",
              "slug": "breakfast"
            }
          ],
          "author": {
            "id": "11111111-1111-1111-1111-111111111111",
            "email": "cook@example.com",
            "username": "cook",
            "first_name": "Sam",
            "last_name": "Baker",
            "is_subscribed": false
          },
          "ingredients": [
            {
              "id": 2,
              "name": "flour",
              "measurement_unit": "g",
              "amount": 200
            }
          ],
          "is_favorited": true,
          "is_in_shopping_cart": false,
          "name": "Recipe 9",
          "image": "recipes/9.png",
          "text": "Mix and bake.",
          "cooking_time": 25
        }
        "##);
    }

    #[rstest]
    fn summary_response_is_flat() {
        let summary = RecipeSummary {
            id: RecipeId::new(3),
            name: "Toast".to_owned(),
            image: "recipes/toast.png".to_owned(),
            cooking_time: 4,
        };
        let value = serde_json::to_value(RecipeSummaryResponse::from(summary)).expect("json");
        assert_eq!(
            value,
            json!({"id": 3, "name": "Toast", "image": "recipes/toast.png", "cooking_time": 4})
        );
    }
}
