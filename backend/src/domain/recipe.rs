//! Recipe catalogue entities and the recipe read model.
//!
//! Identifiers are database-assigned integers wrapped in newtypes so a tag id
//! can never be passed where an ingredient id is expected.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::{AuthorView, User, UserId};

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw database identifier.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Raw database identifier.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

integer_id!(
    /// Identifier of a [`Recipe`].
    RecipeId
);
integer_id!(
    /// Identifier of an [`Ingredient`].
    IngredientId
);
integer_id!(
    /// Identifier of a [`Tag`].
    TagId
);

/// A purchasable ingredient with its measurement unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    pub measurement_unit: String,
}

/// A recipe tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub color: String,
    pub slug: String,
}

/// Quantity of one ingredient used by one recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientAmount {
    pub ingredient: Ingredient,
    pub amount: i32,
}

/// Scalar recipe fields shared by the read and write models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeFields {
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
}

/// Stored recipe with its author, tags and ingredient amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: RecipeId,
    pub author: User,
    pub fields: RecipeFields,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<IngredientAmount>,
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    /// Identifier of the recipe author.
    #[must_use]
    pub fn author_id(&self) -> UserId {
        self.author.id
    }

    /// Short projection of this recipe.
    #[must_use]
    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id,
            name: self.fields.name.clone(),
            image: self.fields.image.clone(),
            cooking_time: self.fields.cooking_time,
        }
    }
}

/// Short recipe projection returned by relationship toggles and
/// subscription listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSummary {
    pub id: RecipeId,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

/// Viewer-specific membership flags for a recipe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecipeFlags {
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// Read-model projection of a recipe as seen by a particular viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeView {
    pub id: RecipeId,
    pub author: AuthorView,
    pub fields: RecipeFields,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<IngredientAmount>,
    pub flags: RecipeFlags,
}

impl RecipeView {
    /// Decorate a stored recipe with viewer flags.
    #[must_use]
    pub fn project(recipe: Recipe, flags: RecipeFlags, is_subscribed: bool) -> Self {
        Self {
            id: recipe.id,
            author: AuthorView {
                user: recipe.author,
                is_subscribed,
            },
            fields: recipe.fields,
            tags: recipe.tags,
            ingredients: recipe.ingredients,
            flags,
        }
    }
}

/// Filters accepted by the recipe listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub author: Option<UserId>,
    pub tag_slugs: Vec<String>,
    /// Restrict to recipes the viewer has favorited.
    pub favorited_by: Option<UserId>,
    /// Restrict to recipes in the viewer's shopping cart.
    pub in_cart_of: Option<UserId>,
}
