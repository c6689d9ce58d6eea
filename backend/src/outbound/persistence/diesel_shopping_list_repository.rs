//! PostgreSQL-backed shopping list aggregation.
//!
//! The group-by-sum runs as one SQL statement; totals come back as `BIGINT`
//! so sums across many recipes cannot overflow the 32-bit amount column.

use async_trait::async_trait;
use diesel::QueryableByName;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Text, Uuid as SqlUuid};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ShoppingListRepository, ShoppingListRepositoryError};
use crate::domain::{IngredientId, ShoppingListLine, UserId};

use super::diesel_basic_error_mapping::{
    classify_diesel_error, map_basic_failure, pool_error_message,
};
use super::pool::{DbPool, PoolError};

const CART_TOTALS_SQL: &str = r#"
SELECT
    i.id AS ingredient_id,
    i.name AS name,
    i.measurement_unit AS measurement_unit,
    SUM(ri.amount)::BIGINT AS total_amount
FROM shopping_cart_entries c
JOIN recipe_ingredients ri ON ri.recipe_id = c.recipe_id
JOIN ingredients i ON i.id = ri.ingredient_id
WHERE c.user_id = $1
GROUP BY i.id, i.name, i.measurement_unit
ORDER BY i.id
"#;

#[derive(Debug, QueryableByName)]
struct CartTotalRow {
    #[diesel(sql_type = BigInt)]
    ingredient_id: i64,
    #[diesel(sql_type = Text)]
    name: String,
    #[diesel(sql_type = Text)]
    measurement_unit: String,
    #[diesel(sql_type = BigInt)]
    total_amount: i64,
}

impl From<CartTotalRow> for ShoppingListLine {
    fn from(row: CartTotalRow) -> Self {
        Self {
            ingredient_id: IngredientId::new(row.ingredient_id),
            name: row.name,
            measurement_unit: row.measurement_unit,
            total_amount: row.total_amount,
        }
    }
}

/// Diesel-backed implementation of the shopping list port.
#[derive(Clone)]
pub struct DieselShoppingListRepository {
    pool: DbPool,
}

impl DieselShoppingListRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ShoppingListRepositoryError {
    ShoppingListRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> ShoppingListRepositoryError {
    map_basic_failure(
        classify_diesel_error(error),
        ShoppingListRepositoryError::query,
        ShoppingListRepositoryError::connection,
    )
}

#[async_trait]
impl ShoppingListRepository for DieselShoppingListRepository {
    async fn cart_totals(
        &self,
        user: &UserId,
    ) -> Result<Vec<ShoppingListLine>, ShoppingListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CartTotalRow> = sql_query(CART_TOTALS_SQL)
            .bind::<SqlUuid, _>(*user.as_uuid())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(ShoppingListLine::from).collect())
    }
}
