//! Test helpers for inbound HTTP components.

use actix_web::http::header::{AUTHORIZATION, HeaderName};
use chrono::{TimeZone, Utc};

use crate::domain::{
    Ingredient, IngredientAmount, IngredientId, Recipe, RecipeFields, RecipeFlags, RecipeId,
    RecipeSummary, RecipeView, Tag, TagId, User, UserId,
};

/// `Authorization` header authenticating `user` against the fixture token
/// repository, which accepts a user's id as their token.
pub fn token_for(user: UserId) -> (HeaderName, String) {
    (AUTHORIZATION, format!("Token {user}"))
}

pub fn sample_user(id: UserId, username: &str) -> User {
    User {
        id,
        email: format!("{username}@example.com"),
        username: username.to_owned(),
        first_name: "Sam".to_owned(),
        last_name: "Baker".to_owned(),
    }
}

pub fn sample_recipe(id: i64, author: User) -> Recipe {
    Recipe {
        id: RecipeId::new(id),
        author,
        fields: RecipeFields {
            name: format!("Recipe {id}"),
            image: format!("recipes/{id}.png"),
            text: "Mix and bake.".to_owned(),
            cooking_time: 25,
        },
        tags: vec![Tag {
            id: TagId::new(1),
            name: "Breakfast".to_owned(),
            color: "#E26C2D".to_owned(),
            slug: "breakfast".to_owned(),
        }],
        ingredients: vec![IngredientAmount {
            ingredient: Ingredient {
                id: IngredientId::new(2),
                name: "flour".to_owned(),
                measurement_unit: "g".to_owned(),
            },
            amount: 200,
        }],
        created_at: Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).single().unwrap_or_default(),
    }
}

pub fn sample_view(id: i64, author: User, flags: RecipeFlags) -> RecipeView {
    RecipeView::project(sample_recipe(id, author), flags, false)
}

pub fn sample_summary(id: i64) -> RecipeSummary {
    sample_recipe(id, sample_user(UserId::random(), "author")).summary()
}
