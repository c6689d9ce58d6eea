//! Recipe write model: raw drafts and the validated command they produce.
//!
//! Handlers build a [`RecipeDraft`] from request data and call
//! [`RecipeDraft::validate`] with the configured [`RecipeLimits`]. Only the
//! resulting [`ValidatedRecipe`] reaches persistence.

use std::collections::HashSet;

use serde_json::json;

use super::limits::RecipeLimits;
use super::recipe::{IngredientId, TagId};
use super::Error;

/// Whether a draft creates a recipe or replaces an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftMode {
    Create,
    Update,
}

/// One requested ingredient line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftIngredient {
    pub id: IngredientId,
    pub amount: i32,
}

/// Unvalidated recipe input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    pub name: String,
    pub image: Option<String>,
    pub text: String,
    pub cooking_time: i32,
    pub tags: Vec<TagId>,
    pub ingredients: Vec<DraftIngredient>,
}

/// Reasons a draft is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeValidationError {
    #[error("recipe name must not be blank")]
    BlankName,
    #[error("recipe name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("recipe text must not be blank")]
    BlankText,
    #[error("cooking time must be between {min} and {max}")]
    CookingTimeOutOfRange { value: i32, min: i32, max: i32 },
    #[error("a recipe image is required")]
    MissingImage,
    #[error("a recipe needs at least one tag")]
    EmptyTags,
    #[error("tag {id} is listed more than once")]
    DuplicateTag { id: TagId },
    #[error("a recipe needs at least one ingredient")]
    EmptyIngredients,
    #[error("ingredient {id} is listed more than once")]
    DuplicateIngredient { id: IngredientId },
    #[error("amount for ingredient {id} must be between {min} and {max}")]
    AmountOutOfRange {
        id: IngredientId,
        value: i32,
        min: i32,
        max: i32,
    },
}

impl RecipeValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::BlankName | Self::NameTooLong { .. } => "name",
            Self::BlankText => "text",
            Self::CookingTimeOutOfRange { .. } => "cooking_time",
            Self::MissingImage => "image",
            Self::EmptyTags | Self::DuplicateTag { .. } => "tags",
            Self::EmptyIngredients
            | Self::DuplicateIngredient { .. }
            | Self::AmountOutOfRange { .. } => "ingredients",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::BlankName => "blank_name",
            Self::NameTooLong { .. } => "name_too_long",
            Self::BlankText => "blank_text",
            Self::CookingTimeOutOfRange { .. } => "cooking_time_out_of_range",
            Self::MissingImage => "missing_image",
            Self::EmptyTags => "empty_tags",
            Self::DuplicateTag { .. } => "duplicate_tag",
            Self::EmptyIngredients => "empty_ingredients",
            Self::DuplicateIngredient { .. } => "duplicate_ingredient",
            Self::AmountOutOfRange { .. } => "amount_out_of_range",
        }
    }

    /// Field-level bound failures are plain validation errors; structural
    /// rule violations are invalid operations.
    fn is_field_bound(&self) -> bool {
        matches!(
            self,
            Self::BlankName
                | Self::NameTooLong { .. }
                | Self::BlankText
                | Self::CookingTimeOutOfRange { .. }
                | Self::AmountOutOfRange { .. }
        )
    }
}

impl From<RecipeValidationError> for Error {
    fn from(value: RecipeValidationError) -> Self {
        let mut details = json!({
            "field": value.field(),
            "code": value.code(),
        });
        match &value {
            RecipeValidationError::DuplicateTag { id } => details["id"] = json!(id.get()),
            RecipeValidationError::DuplicateIngredient { id }
            | RecipeValidationError::AmountOutOfRange { id, .. } => {
                details["id"] = json!(id.get());
            }
            _ => {}
        }
        let message = value.to_string();
        let error = if value.is_field_bound() {
            Self::invalid_request(message)
        } else {
            Self::invalid_operation(message)
        };
        error.with_details(details)
    }
}

/// A draft that passed validation. Only constructible through
/// [`RecipeDraft::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRecipe {
    name: String,
    image: Option<String>,
    text: String,
    cooking_time: i32,
    tags: Vec<TagId>,
    ingredients: Vec<DraftIngredient>,
}

impl ValidatedRecipe {
    /// Trimmed name, within the configured length limit.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Image reference; `None` on update keeps the stored image.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Cooking instructions; never blank.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Minutes, within the configured cooking-time bounds.
    pub fn cooking_time(&self) -> i32 {
        self.cooking_time
    }

    /// Distinct tag ids in request order; at least one.
    pub fn tags(&self) -> &[TagId] {
        &self.tags
    }

    /// Distinct ingredients with in-bounds amounts, in request order; at
    /// least one.
    pub fn ingredients(&self) -> &[DraftIngredient] {
        &self.ingredients
    }
}

impl RecipeDraft {
    /// Check the draft against `limits` and produce a write command.
    ///
    /// # Examples
    /// ```
    /// use foodgram::domain::{
    ///     DraftIngredient, DraftMode, IngredientId, RecipeDraft, RecipeLimits,
    ///     RecipeValidationError, TagId,
    /// };
    ///
    /// let draft = RecipeDraft {
    ///     name: "Porridge".into(),
    ///     image: Some("recipes/porridge.png".into()),
    ///     text: "Simmer oats in milk.".into(),
    ///     cooking_time: 10,
    ///     tags: vec![TagId::new(1)],
    ///     ingredients: vec![
    ///         DraftIngredient { id: IngredientId::new(7), amount: 10 },
    ///         DraftIngredient { id: IngredientId::new(7), amount: 20 },
    ///     ],
    /// };
    /// let err = draft
    ///     .validate(&RecipeLimits::default(), DraftMode::Create)
    ///     .unwrap_err();
    /// assert_eq!(
    ///     err,
    ///     RecipeValidationError::DuplicateIngredient { id: IngredientId::new(7) }
    /// );
    /// ```
    pub fn validate(
        self,
        limits: &RecipeLimits,
        mode: DraftMode,
    ) -> Result<ValidatedRecipe, RecipeValidationError> {
        let image = self.image.filter(|image| !image.trim().is_empty());
        if mode == DraftMode::Create && image.is_none() {
            return Err(RecipeValidationError::MissingImage);
        }

        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(RecipeValidationError::BlankName);
        }
        if name.chars().count() > limits.name_max_length() {
            return Err(RecipeValidationError::NameTooLong {
                max: limits.name_max_length(),
            });
        }
        if self.text.trim().is_empty() {
            return Err(RecipeValidationError::BlankText);
        }
        let cooking = limits.cooking_time();
        if !cooking.contains(self.cooking_time) {
            return Err(RecipeValidationError::CookingTimeOutOfRange {
                value: self.cooking_time,
                min: cooking.min(),
                max: cooking.max(),
            });
        }

        check_tags(&self.tags)?;
        check_ingredients(&self.ingredients, limits)?;

        Ok(ValidatedRecipe {
            name,
            image,
            text: self.text,
            cooking_time: self.cooking_time,
            tags: self.tags,
            ingredients: self.ingredients,
        })
    }
}

fn check_tags(tags: &[TagId]) -> Result<(), RecipeValidationError> {
    if tags.is_empty() {
        return Err(RecipeValidationError::EmptyTags);
    }
    let mut seen = HashSet::with_capacity(tags.len());
    for id in tags {
        if !seen.insert(*id) {
            return Err(RecipeValidationError::DuplicateTag { id: *id });
        }
    }
    Ok(())
}

fn check_ingredients(
    ingredients: &[DraftIngredient],
    limits: &RecipeLimits,
) -> Result<(), RecipeValidationError> {
    if ingredients.is_empty() {
        return Err(RecipeValidationError::EmptyIngredients);
    }
    let mut seen = HashSet::with_capacity(ingredients.len());
    for line in ingredients {
        if !seen.insert(line.id) {
            return Err(RecipeValidationError::DuplicateIngredient { id: line.id });
        }
    }
    let bounds = limits.amount();
    if let Some(line) = ingredients.iter().find(|line| !bounds.contains(line.amount)) {
        return Err(RecipeValidationError::AmountOutOfRange {
            id: line.id,
            value: line.amount,
            min: bounds.min(),
            max: bounds.max(),
        });
    }
    Ok(())
}
