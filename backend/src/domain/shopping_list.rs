//! Consolidated shopping list built from a user's cart.

use super::recipe::IngredientId;

/// First line of every rendered shopping list.
pub const SHOPPING_LIST_HEADER: &str = "Shopping list:";
/// File name offered to clients downloading the list.
pub const SHOPPING_LIST_FILENAME: &str = "shopping-list.txt";

/// Total quantity of one ingredient across all recipes in a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListLine {
    /// Ingredient the line totals; lines are unique per ingredient.
    pub ingredient_id: IngredientId,
    /// Ingredient name as stored in the catalogue.
    pub name: String,
    /// Unit shared by every amount summed into this line.
    pub measurement_unit: String,
    /// Sum of the ingredient's amounts over every cart recipe; may exceed
    /// `i32::MAX`.
    pub total_amount: i64,
}

/// Aggregated shopping list, ordered by ingredient id ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShoppingList {
    lines: Vec<ShoppingListLine>,
}

impl ShoppingList {
    /// Build a list, sorting lines by ingredient id.
    #[must_use]
    pub fn new(mut lines: Vec<ShoppingListLine>) -> Self {
        lines.sort_by_key(|line| line.ingredient_id);
        Self { lines }
    }

    /// Lines in ingredient id order.
    #[must_use]
    pub fn lines(&self) -> &[ShoppingListLine] {
        &self.lines
    }

    /// True for an empty cart; such a list still renders its header.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Render the list as a plain-text document.
    ///
    /// # Examples
    /// ```
    /// use foodgram::domain::{IngredientId, ShoppingList, ShoppingListLine};
    ///
    /// let list = ShoppingList::new(vec![ShoppingListLine {
    ///     ingredient_id: IngredientId::new(1),
    ///     name: "flour".into(),
    ///     measurement_unit: "g".into(),
    ///     total_amount: 250,
    /// }]);
    /// assert_eq!(list.render(), "Shopping list:\nflour, 250 g\n");
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        let mut text = String::with_capacity(SHOPPING_LIST_HEADER.len() + 1 + self.lines.len() * 24);
        text.push_str(SHOPPING_LIST_HEADER);
        text.push('\n');
        for line in &self.lines {
            text.push_str(&format!(
                "{}, {} {}\n",
                line.name, line.total_amount, line.measurement_unit
            ));
        }
        text
    }
}
