//! Behavioural tests for the favorite, cart and follow toggles.
//!
//! The scenarios drive [`RelationshipService`] over an in-memory repository
//! that enforces the same set semantics as the Diesel adapter.

use std::cell::RefCell;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use foodgram::domain::ports::{
    RelationshipCommand, RelationshipQuery, RelationshipRepository, RelationshipRepositoryError,
};
use foodgram::domain::{Error, RecipeFlags, RecipeId, Relationship, RelationshipService, UserId};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;

#[derive(Default)]
struct InMemoryRelationships {
    recipes: Mutex<HashSet<RecipeId>>,
    users: Mutex<HashSet<UserId>>,
    rows: Mutex<HashSet<Relationship>>,
}

impl InMemoryRelationships {
    fn target_exists(&self, relationship: &Relationship) -> bool {
        match relationship {
            Relationship::Favorite { recipe, .. } | Relationship::ShoppingCart { recipe, .. } => {
                self.recipes.lock().expect("recipes lock").contains(recipe)
            }
            Relationship::Follow { author, .. } => {
                self.users.lock().expect("users lock").contains(author)
            }
        }
    }

    fn check_target(&self, relationship: &Relationship) -> Result<(), RelationshipRepositoryError> {
        if self.target_exists(relationship) {
            Ok(())
        } else {
            Err(RelationshipRepositoryError::target_missing(
                relationship.kind(),
                relationship.target_label(),
            ))
        }
    }
}

#[async_trait]
impl RelationshipRepository for InMemoryRelationships {
    async fn insert(&self, relationship: &Relationship) -> Result<(), RelationshipRepositoryError> {
        self.check_target(relationship)?;
        if self.rows.lock().expect("rows lock").insert(*relationship) {
            Ok(())
        } else {
            Err(RelationshipRepositoryError::duplicate(relationship.kind()))
        }
    }

    async fn delete(&self, relationship: &Relationship) -> Result<(), RelationshipRepositoryError> {
        self.check_target(relationship)?;
        if self.rows.lock().expect("rows lock").remove(relationship) {
            Ok(())
        } else {
            Err(RelationshipRepositoryError::missing(relationship.kind()))
        }
    }

    async fn contains(
        &self,
        relationship: &Relationship,
    ) -> Result<bool, RelationshipRepositoryError> {
        Ok(self.rows.lock().expect("rows lock").contains(relationship))
    }

    async fn recipe_flags(
        &self,
        user: &UserId,
        recipes: &[RecipeId],
    ) -> Result<Vec<RecipeFlags>, RelationshipRepositoryError> {
        let rows = self.rows.lock().expect("rows lock");
        Ok(recipes
            .iter()
            .map(|recipe| RecipeFlags {
                is_favorited: rows.contains(&Relationship::Favorite {
                    user: *user,
                    recipe: *recipe,
                }),
                is_in_shopping_cart: rows.contains(&Relationship::ShoppingCart {
                    user: *user,
                    recipe: *recipe,
                }),
            })
            .collect())
    }

    async fn followed_among(
        &self,
        follower: &UserId,
        authors: &[UserId],
    ) -> Result<Vec<UserId>, RelationshipRepositoryError> {
        let rows = self.rows.lock().expect("rows lock");
        Ok(authors
            .iter()
            .copied()
            .filter(|author| {
                rows.contains(&Relationship::Follow {
                    follower: *follower,
                    author: *author,
                })
            })
            .collect())
    }
}

struct World {
    runtime: Runtime,
    repo: Arc<InMemoryRelationships>,
    service: RelationshipService<InMemoryRelationships>,
    viewer: UserId,
    author: UserId,
    last_result: RefCell<Option<Result<(), Error>>>,
}

impl World {
    fn toggle_add(&self, relationship: Relationship) {
        let result = self.runtime.block_on(self.service.add(&relationship));
        self.last_result.replace(Some(result));
    }

    fn toggle_remove(&self, relationship: Relationship) {
        let result = self.runtime.block_on(self.service.remove(&relationship));
        self.last_result.replace(Some(result));
    }

    fn favorite(&self, recipe: i64) -> Relationship {
        Relationship::Favorite {
            user: self.viewer,
            recipe: RecipeId::new(recipe),
        }
    }

    fn cart_entry(&self, recipe: i64) -> Relationship {
        Relationship::ShoppingCart {
            user: self.viewer,
            recipe: RecipeId::new(recipe),
        }
    }
}

#[fixture]
fn world() -> World {
    let repo = Arc::new(InMemoryRelationships::default());
    let viewer = UserId::random();
    let author = UserId::random();
    {
        let mut users = repo.users.lock().expect("users lock");
        users.insert(viewer);
        users.insert(author);
    }
    World {
        runtime: Runtime::new().expect("tokio runtime"),
        service: RelationshipService::new(Arc::clone(&repo)),
        repo,
        viewer,
        author,
        last_result: RefCell::new(None),
    }
}

#[given("a recipe {id} by a known author")]
fn a_recipe_by_a_known_author(world: &World, id: i64) {
    world
        .repo
        .recipes
        .lock()
        .expect("recipes lock")
        .insert(RecipeId::new(id));
}

#[when("the viewer favorites recipe {id}")]
fn the_viewer_favorites_recipe(world: &World, id: i64) {
    world.toggle_add(world.favorite(id));
}

#[when("the viewer adds recipe {id} to the cart")]
fn the_viewer_adds_recipe_to_the_cart(world: &World, id: i64) {
    world.toggle_add(world.cart_entry(id));
}

#[when("the viewer removes recipe {id} from the cart")]
fn the_viewer_removes_recipe_from_the_cart(world: &World, id: i64) {
    world.toggle_remove(world.cart_entry(id));
}

#[when("the viewer follows themselves")]
fn the_viewer_follows_themselves(world: &World) {
    world.toggle_add(Relationship::Follow {
        follower: world.viewer,
        author: world.viewer,
    });
}

#[when("the viewer follows the author")]
fn the_viewer_follows_the_author(world: &World) {
    world.toggle_add(Relationship::Follow {
        follower: world.viewer,
        author: world.author,
    });
}

#[then("the last toggle succeeds")]
fn the_last_toggle_succeeds(world: &World) {
    let last = world.last_result.borrow();
    let result = last.as_ref().expect("a toggle ran");
    assert!(result.is_ok(), "unexpected failure: {result:?}");
}

#[then("the last toggle fails with \"{code}\"")]
fn the_last_toggle_fails_with(world: &World, code: String) {
    let last = world.last_result.borrow();
    let err = last
        .as_ref()
        .expect("a toggle ran")
        .as_ref()
        .expect_err("toggle should fail");
    let actual = serde_json::to_value(err.code()).expect("code serializes");
    assert_eq!(actual, code.as_str());
}

#[then("recipe {id} is favorited by the viewer")]
fn recipe_is_favorited_by_the_viewer(world: &World, id: i64) {
    let favorited = world
        .runtime
        .block_on(world.service.is_favorited(RecipeId::new(id), Some(world.viewer)))
        .expect("flag lookup");
    assert!(favorited);
}

#[then("recipe {id} is not in the viewer's cart")]
fn recipe_is_not_in_the_viewers_cart(world: &World, id: i64) {
    let in_cart = world
        .runtime
        .block_on(world.service.is_in_cart(RecipeId::new(id), Some(world.viewer)))
        .expect("flag lookup");
    assert!(!in_cart);
}

#[then("an anonymous viewer sees recipe {id} as not favorited")]
fn an_anonymous_viewer_sees_recipe_as_not_favorited(world: &World, id: i64) {
    let favorited = world
        .runtime
        .block_on(world.service.is_favorited(RecipeId::new(id), None))
        .expect("flag lookup");
    assert!(!favorited);
}

#[then("an anonymous viewer sees the author as not followed")]
fn an_anonymous_viewer_sees_the_author_as_not_followed(world: &World) {
    let subscribed = world
        .runtime
        .block_on(world.service.is_subscribed(world.author, None))
        .expect("flag lookup");
    assert!(!subscribed);
}

#[then("the viewer sees the author as followed")]
fn the_viewer_sees_the_author_as_followed(world: &World) {
    let subscribed = world
        .runtime
        .block_on(world.service.is_subscribed(world.author, Some(world.viewer)))
        .expect("flag lookup");
    assert!(subscribed);
}

#[scenario(
    path = "tests/features/relationship_toggles.feature",
    name = "Favoriting a recipe twice is refused"
)]
fn favoriting_twice_is_refused(world: World) {
    drop(world);
}

#[scenario(
    path = "tests/features/relationship_toggles.feature",
    name = "Removing a recipe that is not in the cart is refused"
)]
fn removing_absent_cart_entry_is_refused(world: World) {
    drop(world);
}

#[scenario(
    path = "tests/features/relationship_toggles.feature",
    name = "Cart toggles round trip"
)]
fn cart_toggles_round_trip(world: World) {
    drop(world);
}

#[scenario(
    path = "tests/features/relationship_toggles.feature",
    name = "Toggling an unknown recipe reports it missing"
)]
fn toggling_unknown_recipe_reports_it_missing(world: World) {
    drop(world);
}

#[scenario(
    path = "tests/features/relationship_toggles.feature",
    name = "Following yourself is refused"
)]
fn following_yourself_is_refused(world: World) {
    drop(world);
}

#[scenario(
    path = "tests/features/relationship_toggles.feature",
    name = "Anonymous viewers see no memberships"
)]
fn anonymous_viewers_see_no_memberships(world: World) {
    drop(world);
}
