//! Subscription read model: a followed author with a preview of their recipes.

use super::recipe::RecipeSummary;
use super::user::User;

/// One followed author as listed on the subscriptions page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub author: User,
    /// Newest recipes first, truncated to the requested preview size.
    pub recipes: Vec<RecipeSummary>,
    /// Total number of recipes by this author.
    pub recipes_count: u64,
}

/// How many recipes to preview per author; `None` means all of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecipesPreview(Option<u32>);

impl RecipesPreview {
    #[must_use]
    pub const fn limited(limit: u32) -> Self {
        Self(Some(limit))
    }

    #[must_use]
    pub const fn unlimited() -> Self {
        Self(None)
    }

    #[must_use]
    pub const fn limit(self) -> Option<u32> {
        self.0
    }
}
