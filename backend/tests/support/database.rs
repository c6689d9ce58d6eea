//! Shared PostgreSQL harness for the Diesel adapter suites.
//!
//! Each test gets a private embedded cluster with migrations applied. Setting
//! `FOODGRAM_TEST_DATABASE_URL` points the suites at an existing database
//! instead. Setup failures panic unless `SKIP_TEST_CLUSTER` is truthy.
//! Seeded rows carry a random suffix so suites can share one database.

#[path = "cluster_skip.rs"]
mod cluster_skip;
#[path = "pg_embed.rs"]
mod pg_embed;

use std::cell::RefCell;
use std::future::Future;

use diesel::pg::PgConnection;
use diesel::sql_types::{BigInt, Text, Uuid as SqlUuid};
use diesel::{Connection, QueryableByName, RunQueryDsl, sql_query};
use foodgram::domain::{
    DraftIngredient, DraftMode, IngredientId, RecipeDraft, RecipeLimits, TagId, UserId,
    ValidatedRecipe,
};
use foodgram::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use pg_embedded_setup_unpriv::TestCluster;
use rstest::fixture;
use tokio::runtime::Runtime;
use uuid::Uuid;

use cluster_skip::handle_cluster_setup_failure;
use pg_embed::test_cluster;

pub const TEST_DATABASE_URL_ENV: &str = "FOODGRAM_TEST_DATABASE_URL";

/// Database the embedded cluster always creates.
const CLUSTER_DATABASE: &str = "postgres";

#[derive(QueryableByName)]
struct IdRow {
    #[diesel(sql_type = BigInt)]
    id: i64,
}

/// Migrated database, a runtime to drive the async adapters and a
/// synchronous connection for seeding rows.
pub struct TestDatabase {
    pub pool: DbPool,
    runtime: Runtime,
    seeder: RefCell<PgConnection>,
    _cluster: Option<TestCluster>,
}

/// Database for one test, or `None` when setup failed and skipping is allowed.
#[fixture]
pub fn db() -> Option<TestDatabase> {
    match connect() {
        Ok(database) => Some(database),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn connect() -> Result<TestDatabase, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let (url, cluster) = match std::env::var(TEST_DATABASE_URL_ENV) {
        Ok(url) if !url.trim().is_empty() => (url, None),
        _ => {
            let cluster = test_cluster()?;
            let url = cluster.connection().database_url(CLUSTER_DATABASE);
            (url, Some(cluster))
        }
    };
    runtime
        .block_on(run_pending_migrations(&url))
        .map_err(|err| format!("migrations: {err}"))?;
    let pool = runtime
        .block_on(DbPool::new(
            PoolConfig::new(url.as_str())
                .with_max_size(2)
                .with_min_idle(None),
        ))
        .map_err(|err| err.to_string())?;
    let seeder = PgConnection::establish(&url).map_err(|err| format!("seeder: {err}"))?;
    Ok(TestDatabase {
        pool,
        runtime,
        seeder: RefCell::new(seeder),
        _cluster: cluster,
    })
}

fn suffix() -> String {
    Uuid::new_v4().simple().to_string()
}

impl TestDatabase {
    /// Drive an adapter future to completion.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Insert a user whose username starts with `name`.
    pub fn user(&self, name: &str) -> UserId {
        let id = Uuid::new_v4();
        let username = format!("{name}-{}", suffix());
        sql_query(
            "INSERT INTO users (id, email, username, first_name, last_name) \
             VALUES ($1, $2 || '@example.com', $2, 'Test', 'User')",
        )
        .bind::<SqlUuid, _>(id)
        .bind::<Text, _>(&username)
        .execute(&mut *self.seeder.borrow_mut())
        .expect("user row");
        UserId::from_uuid(id)
    }

    /// Insert an ingredient whose name starts with `name`.
    pub fn ingredient(&self, name: &str, unit: &str) -> IngredientId {
        let row: IdRow = sql_query(
            "INSERT INTO ingredients (name, measurement_unit) VALUES ($1, $2) RETURNING id",
        )
        .bind::<Text, _>(format!("{name}-{}", suffix()))
        .bind::<Text, _>(unit)
        .get_result(&mut *self.seeder.borrow_mut())
        .expect("ingredient row");
        IngredientId::new(row.id)
    }

    /// Insert a tag; returns its id and slug.
    pub fn tag(&self, name: &str) -> (TagId, String) {
        let unique = suffix();
        let slug = format!("{name}-{}", &unique[..12]);
        let color = format!("#{}", &unique[..6]);
        let row: IdRow =
            sql_query("INSERT INTO tags (name, color, slug) VALUES ($1, $2, $1) RETURNING id")
                .bind::<Text, _>(&slug)
                .bind::<Text, _>(color)
                .get_result(&mut *self.seeder.borrow_mut())
                .expect("tag row");
        (TagId::new(row.id), slug)
    }

    /// Validated create-mode recipe with the given tags and ingredient amounts.
    ///
    /// An empty tag or ingredient list is filled with one freshly seeded row,
    /// since drafts without either never validate.
    pub fn recipe(
        &self,
        name: &str,
        tags: &[TagId],
        ingredients: &[(IngredientId, i32)],
    ) -> ValidatedRecipe {
        let tags = if tags.is_empty() {
            vec![self.tag("filler").0]
        } else {
            tags.to_vec()
        };
        let ingredients = if ingredients.is_empty() {
            vec![(self.ingredient("filler", "g"), 1)]
        } else {
            ingredients.to_vec()
        };
        RecipeDraft {
            name: name.to_owned(),
            image: Some(format!("recipes/{name}.png")),
            text: "Mix and bake.".to_owned(),
            cooking_time: 20,
            tags,
            ingredients: ingredients
                .into_iter()
                .map(|(id, amount)| DraftIngredient { id, amount })
                .collect(),
        }
        .validate(&RecipeLimits::default(), DraftMode::Create)
        .expect("recipe draft should validate")
    }
}
