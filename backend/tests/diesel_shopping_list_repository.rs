//! Integration tests for the cart aggregation and subscription read model.

#[path = "support/database.rs"]
mod database;

use database::{TestDatabase, db};
use foodgram::domain::ports::{
    RecipeRepository, RelationshipRepository, ShoppingListRepository, SubscriptionRepository,
};
use foodgram::domain::{PageRequest, RecipesPreview, Relationship};
use foodgram::outbound::persistence::{
    DieselRecipeRepository, DieselRelationshipRepository, DieselShoppingListRepository,
    DieselSubscriptionRepository,
};
use rstest::rstest;

#[rstest]
fn cart_totals_sum_amounts_per_ingredient(db: Option<TestDatabase>) {
    let Some(db) = db else {
        return;
    };
    db.block_on(async {
        let author = db.user("author");
        let shopper = db.user("shopper");
        let flour = db.ingredient("flour", "g");
        let sugar = db.ingredient("sugar", "g");
        let eggs = db.ingredient("eggs", "pcs");
        let recipes = DieselRecipeRepository::new(db.pool.clone());
        let cake = recipes
            .create(&author, &db.recipe("cake", &[], &[(flour, 200), (sugar, 100)]))
            .await
            .expect("cake");
        let cookies = recipes
            .create(&author, &db.recipe("cookies", &[], &[(sugar, 50), (flour, 250)]))
            .await
            .expect("cookies");
        recipes
            .create(&author, &db.recipe("omelette", &[], &[(eggs, 3)]))
            .await
            .expect("omelette outside the cart");
        let relationships = DieselRelationshipRepository::new(db.pool.clone());
        for recipe_id in [cake, cookies] {
            relationships
                .insert(&Relationship::ShoppingCart {
                    user: shopper,
                    recipe: recipe_id,
                })
                .await
                .expect("cart entry");
        }

        let lines = DieselShoppingListRepository::new(db.pool.clone())
            .cart_totals(&shopper)
            .await
            .expect("totals");

        let totals: Vec<_> = lines
            .iter()
            .map(|line| (line.ingredient_id, line.measurement_unit.as_str(), line.total_amount))
            .collect();
        assert_eq!(totals, vec![(flour, "g", 450), (sugar, "g", 150)]);
    });
}

#[rstest]
fn empty_carts_have_no_lines(db: Option<TestDatabase>) {
    let Some(db) = db else {
        return;
    };
    db.block_on(async {
        let shopper = db.user("shopper");

        let lines = DieselShoppingListRepository::new(db.pool.clone())
            .cart_totals(&shopper)
            .await
            .expect("totals");

        assert!(lines.is_empty());
    });
}

#[rstest]
fn subscriptions_preview_the_newest_recipes(db: Option<TestDatabase>) {
    let Some(db) = db else {
        return;
    };
    db.block_on(async {
        let author = db.user("author");
        let follower = db.user("follower");
        let recipes = DieselRecipeRepository::new(db.pool.clone());
        let mut created = Vec::new();
        for name in ["first", "second", "third"] {
            created.push(
                recipes
                    .create(&author, &db.recipe(name, &[], &[]))
                    .await
                    .expect("recipe"),
            );
        }
        DieselRelationshipRepository::new(db.pool.clone())
            .insert(&Relationship::Follow { follower, author })
            .await
            .expect("follow");
        let repo = DieselSubscriptionRepository::new(db.pool.clone());

        let page = repo
            .followed_authors(
                &follower,
                PageRequest::try_new(None, None).expect("page"),
                RecipesPreview::limited(2),
            )
            .await
            .expect("subscriptions");

        assert_eq!(page.count, 1);
        let subscription = page.items.first().expect("one subscription");
        assert_eq!(subscription.author.id, author);
        assert_eq!(subscription.recipes_count, 3);
        assert_eq!(
            subscription.recipes.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![created[2], created[1]]
        );

        let single = repo
            .author(&author, RecipesPreview::unlimited())
            .await
            .expect("author lookup")
            .expect("author exists");
        assert_eq!(single.recipes.len(), 3);
    });
}
