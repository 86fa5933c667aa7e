use super::*;
use rust_decimal::Decimal;
use serde_json::json;

fn entry(id: i64, name: &str) -> serde_json::Value {
    json!({
        "pokemon_id": id,
        "name": name,
        "image_url": format!("https://art.example/{id}.png"),
        "sprite_front_default_url": format!("https://sprites.example/{id}.png"),
        "sprite_back_default_url": null,
        "sprite_front_shiny_url": null,
        "sprite_back_shiny_url": null,
        "description": format!("{name} entry"),
        "types": ["grass"],
        "stats": { "hp": 45, "attack": 49 },
        "abilities": ["overgrow"]
    })
}

fn fixed_pricing() -> PricingConfig {
    PricingConfig::new(
        Decimal::new(599, 2),
        Decimal::new(400, 2),
        Decimal::new(1500, 2),
        false,
    )
    .expect("valid pricing")
}

async fn product_count(pool: &PgPool) -> i64 {
    pokeshop_db::count_products(pool).await.expect("count")
}

#[tokio::test]
async fn load_entries_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_entries(&dir.path().join("absent.json"))
        .await
        .unwrap_err();
    assert!(matches!(err, ImportError::Missing { .. }), "{err:?}");
    assert!(err.to_string().contains("absent.json"));
}

#[tokio::test]
async fn load_entries_invalid_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "[{\"pokemon_id\": 1,").expect("write");

    let err = load_entries(&path).await.unwrap_err();
    assert!(matches!(err, ImportError::Decode { .. }), "{err:?}");
}

#[tokio::test]
async fn load_entries_rejects_non_array_document() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("object.json");
    std::fs::write(&path, "{\"pokemon_id\": 1}").expect("write");

    let err = load_entries(&path).await.unwrap_err();
    assert!(matches!(err, ImportError::Decode { .. }), "{err:?}");
}

#[tokio::test]
async fn load_entries_keeps_elements_undecoded() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("mixed.json");
    std::fs::write(&path, "[{\"pokemon_id\": 1}, 42, \"text\"]").expect("write");

    let entries = load_entries(&path).await.expect("array loads");
    assert_eq!(entries.len(), 3);
}

#[sqlx::test(migrations = "../../migrations")]
async fn import_twice_updates_instead_of_duplicating(pool: PgPool) {
    let entries = vec![entry(1, "Bulbasaur"), entry(4, "Charmander")];
    let mut rng = StdRng::seed_from_u64(1);

    let first = import_entries(&pool, entries.clone(), &fixed_pricing(), &mut rng).await;
    assert_eq!(
        first,
        ImportSummary {
            created: 2,
            ..ImportSummary::default()
        }
    );

    let second = import_entries(&pool, entries, &fixed_pricing(), &mut rng).await;
    assert_eq!(
        second,
        ImportSummary {
            updated: 2,
            ..ImportSummary::default()
        }
    );
    assert_eq!(product_count(&pool).await, 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn import_skips_incomplete_records_and_continues(pool: PgPool) {
    let mut nameless = entry(2, "Ivysaur");
    nameless["name"] = serde_json::Value::Null;
    let mut no_image = entry(3, "Venusaur");
    no_image["image_url"] = json!("   ");
    let entries = vec![
        entry(1, "Bulbasaur"),
        nameless,
        no_image,
        json!({ "pokemon_id": "seven" }),
        entry(4, "Charmander"),
    ];
    let mut rng = StdRng::seed_from_u64(2);

    let summary = import_entries(&pool, entries, &fixed_pricing(), &mut rng).await;
    assert_eq!(summary.created, 2);
    assert_eq!(summary.skipped, 3);
    assert_eq!(summary.failed, 0);

    let rows = pokeshop_db::list_products_page(&pool, 10, 0)
        .await
        .expect("list");
    let ids: Vec<i64> = rows.iter().map(|r| r.external_id).collect();
    assert_eq!(ids, vec![1, 4]);
    assert_eq!(rows[0].price, Decimal::new(599, 2));
}

#[sqlx::test(migrations = "../../migrations")]
async fn import_counts_store_failures_without_aborting(pool: PgPool) {
    // Same name under a new external id violates the unique name constraint.
    let entries = vec![
        entry(1, "Bulbasaur"),
        entry(9001, "Bulbasaur"),
        entry(4, "Charmander"),
    ];
    let mut rng = StdRng::seed_from_u64(3);

    let summary = import_entries(&pool, entries, &fixed_pricing(), &mut rng).await;
    assert_eq!(summary.created, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(product_count(&pool).await, 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn random_prices_stay_within_range(pool: PgPool) {
    let pricing = PricingConfig::new(
        Decimal::new(599, 2),
        Decimal::new(400, 2),
        Decimal::new(1500, 2),
        true,
    )
    .expect("valid pricing");
    let entries: Vec<_> = (1..=12).map(|id| entry(id, &format!("Mon{id}"))).collect();
    let mut rng = StdRng::seed_from_u64(4);

    let summary = import_entries(&pool, entries, &pricing, &mut rng).await;
    assert_eq!(summary.created, 12);

    let rows = pokeshop_db::list_products_page(&pool, 20, 0)
        .await
        .expect("list");
    for row in rows {
        assert!(row.price >= Decimal::new(400, 2), "{}", row.price);
        assert!(row.price <= Decimal::new(1500, 2), "{}", row.price);
        assert_eq!(row.price.scale(), 2);
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn run_import_reads_file_end_to_end(pool: PgPool) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("pokemon_raw_data.json");
    let body = serde_json::to_string(&vec![entry(25, "Pikachu")]).expect("encode");
    std::fs::write(&path, body).expect("write");

    let summary = run_import(&pool, &path, &fixed_pricing())
        .await
        .expect("import");
    assert_eq!(summary.created, 1);

    let listed = pokeshop_db::list_products_page(&pool, 1, 0)
        .await
        .expect("list");
    let row = pokeshop_db::get_product(&pool, listed[0].id)
        .await
        .expect("query")
        .expect("row");
    assert_eq!(row.name, "Pikachu");
    assert_eq!(row.categories, vec!["grass"]);
    assert_eq!(row.stats.0.keys().collect::<Vec<_>>(), vec!["hp", "attack"]);
}
