//! Read-only port over the ingredient and tag catalogues.

use async_trait::async_trait;

use crate::domain::{Ingredient, IngredientId, Tag, TagId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by catalogue repository adapters.
    pub enum CatalogueRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "catalogue repository connection failed: {message}",
        /// The lookup failed.
        Query { message: String } =>
            "catalogue repository query failed: {message}",
    }
}

/// Catalogue lookups used by the HTTP adapter.
#[async_trait]
pub trait CatalogueRepository: Send + Sync {
    /// Ingredients ordered by name, optionally restricted to names starting
    /// with `name_prefix` (case-insensitive).
    async fn ingredients(
        &self,
        name_prefix: Option<String>,
    ) -> Result<Vec<Ingredient>, CatalogueRepositoryError>;

    async fn ingredient(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, CatalogueRepositoryError>;

    /// All tags ordered by id.
    async fn tags(&self) -> Result<Vec<Tag>, CatalogueRepositoryError>;

    async fn tag(&self, id: TagId) -> Result<Option<Tag>, CatalogueRepositoryError>;
}

/// Fixture catalogue with a handful of staples, used when no database is
/// configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCatalogueRepository;

fn fixture_ingredients() -> Vec<Ingredient> {
    [(1, "apples", "pcs"), (2, "flour", "g"), (3, "milk", "ml")]
        .into_iter()
        .map(|(id, name, unit)| Ingredient {
            id: IngredientId::new(id),
            name: name.to_owned(),
            measurement_unit: unit.to_owned(),
        })
        .collect()
}

fn fixture_tags() -> Vec<Tag> {
    [(1, "Breakfast", "#E26C2D", "breakfast"), (2, "Dinner", "#49B64E", "dinner")]
        .into_iter()
        .map(|(id, name, color, slug)| Tag {
            id: TagId::new(id),
            name: name.to_owned(),
            color: color.to_owned(),
            slug: slug.to_owned(),
        })
        .collect()
}

#[async_trait]
impl CatalogueRepository for FixtureCatalogueRepository {
    async fn ingredients(
        &self,
        name_prefix: Option<String>,
    ) -> Result<Vec<Ingredient>, CatalogueRepositoryError> {
        let prefix = name_prefix.map(|p| p.to_lowercase());
        Ok(fixture_ingredients()
            .into_iter()
            .filter(|ingredient| {
                prefix
                    .as_deref()
                    .is_none_or(|p| ingredient.name.to_lowercase().starts_with(p))
            })
            .collect())
    }

    async fn ingredient(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, CatalogueRepositoryError> {
        Ok(fixture_ingredients().into_iter().find(|i| i.id == id))
    }

    async fn tags(&self) -> Result<Vec<Tag>, CatalogueRepositoryError> {
        Ok(fixture_tags())
    }

    async fn tag(&self, id: TagId) -> Result<Option<Tag>, CatalogueRepositoryError> {
        Ok(fixture_tags().into_iter().find(|t| t.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_filters_by_case_insensitive_prefix() {
        let found = FixtureCatalogueRepository
            .ingredients(Some("FL".to_owned()))
            .await
            .expect("fixture lookup");
        let names: Vec<_> = found.into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["flour".to_owned()]);
    }
}
