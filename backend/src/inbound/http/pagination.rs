//! Page envelope returned by list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Page;

/// `{count, next, previous, results}` where `next` and `previous` are page
/// numbers, or `null` at either end.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct Paginated<T> {
    /// Total number of matching rows.
    pub count: u64,
    pub next: Option<u32>,
    pub previous: Option<u32>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    /// Convert a domain page, mapping each item into its response body.
    pub fn from_page<U>(page: Page<U>, into: impl FnMut(U) -> T) -> Self {
        let next = page.next();
        let previous = page.previous();
        let page = page.map(into);
        Self {
            count: page.count,
            next,
            previous,
            results: page.items,
        }
    }
}
