//! Live integration tests for pokeshop-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. The `migrations` path is relative to the crate root
//! (`crates/pokeshop-db/`), so `"../../migrations"` resolves to the workspace
//! migration directory.

use indexmap::IndexMap;
use pokeshop_core::NewCatalogItem;
use pokeshop_db::{count_products, get_product, list_products_page, upsert_product};
use rust_decimal::Decimal;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn make_item(external_id: i64, name: &str) -> NewCatalogItem {
    NewCatalogItem {
        external_id,
        name: name.to_string(),
        primary_image_url: format!("https://img.example/{external_id}.png"),
        sprite_front_default_url: Some(format!("https://img.example/front/{external_id}.png")),
        sprite_back_default_url: None,
        sprite_front_shiny_url: None,
        sprite_back_shiny_url: None,
        description: "Test description".to_string(),
        categories: vec!["fire".to_string(), "flying".to_string()],
        stats: IndexMap::from([("hp".to_string(), 78), ("speed".to_string(), 100)]),
        abilities: vec!["blaze".to_string()],
    }
}

// ---------------------------------------------------------------------------
// upsert_product
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn upsert_product_inserts_then_updates(pool: sqlx::PgPool) {
    let item = make_item(6, "Charizard");

    let first = upsert_product(&pool, &item, Decimal::new(599, 2))
        .await
        .expect("first upsert");
    assert!(first.created);
    let created_at = get_product(&pool, first.id)
        .await
        .expect("get")
        .expect("row exists")
        .created_at;

    let renamed = NewCatalogItem {
        description: "Updated".to_string(),
        ..item
    };
    let second = upsert_product(&pool, &renamed, Decimal::new(1250, 2))
        .await
        .expect("second upsert");
    assert!(!second.created);
    assert_eq!(first.id, second.id);

    assert_eq!(count_products(&pool).await.expect("count"), 1);

    let row = get_product(&pool, first.id)
        .await
        .expect("get")
        .expect("row exists");
    assert_eq!(row.description, "Updated");
    assert_eq!(row.price.to_string(), "12.50");
    assert_eq!(row.created_at, created_at);
    assert!(row.updated_at >= row.created_at);
    assert_eq!(row.categories, vec!["fire", "flying"]);
    assert_eq!(row.stats.0.get("speed"), Some(&100));
}

#[sqlx::test(migrations = "../../migrations")]
async fn upsert_product_rejects_negative_price(pool: sqlx::PgPool) {
    let result = upsert_product(&pool, &make_item(8, "Wartortle"), Decimal::new(-1, 2)).await;
    assert!(result.is_err(), "negative price must violate the price check");
    assert_eq!(count_products(&pool).await.expect("count"), 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn upsert_product_reactivates_inactive_row(pool: sqlx::PgPool) {
    let item = make_item(7, "Squirtle");
    let outcome = upsert_product(&pool, &item, Decimal::new(599, 2))
        .await
        .expect("upsert");

    sqlx::query("UPDATE products SET is_active = false WHERE id = $1")
        .bind(outcome.id)
        .execute(&pool)
        .await
        .expect("deactivate");

    upsert_product(&pool, &item, Decimal::new(599, 2))
        .await
        .expect("re-upsert");
    let row = get_product(&pool, outcome.id).await.unwrap().unwrap();
    assert!(row.is_active);
}

#[sqlx::test(migrations = "../../migrations")]
async fn upsert_product_rejects_duplicate_name(pool: sqlx::PgPool) {
    upsert_product(&pool, &make_item(1, "Bulbasaur"), Decimal::new(599, 2))
        .await
        .expect("first");

    let result = upsert_product(&pool, &make_item(2, "Bulbasaur"), Decimal::new(599, 2)).await;
    assert!(result.is_err(), "name must stay unique across external ids");
    assert_eq!(count_products(&pool).await.unwrap(), 1);
}

// ---------------------------------------------------------------------------
// reads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn list_products_page_orders_by_external_id(pool: sqlx::PgPool) {
    for (id, name) in [(9, "Blastoise"), (1, "Bulbasaur"), (4, "Charmander")] {
        upsert_product(&pool, &make_item(id, name), Decimal::new(599, 2))
            .await
            .expect("upsert");
    }

    let first_page = list_products_page(&pool, 2, 0).await.expect("page 1");
    let ids: Vec<i64> = first_page.iter().map(|r| r.external_id).collect();
    assert_eq!(ids, vec![1, 4]);

    let second_page = list_products_page(&pool, 2, 2).await.expect("page 2");
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].external_id, 9);
}

#[sqlx::test(migrations = "../../migrations")]
async fn get_product_returns_none_for_unknown_id(pool: sqlx::PgPool) {
    let row = get_product(&pool, 999_999).await.expect("query");
    assert!(row.is_none());
}
