//! Database operations for the `products` catalog table.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use pokeshop_core::NewCatalogItem;
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A full row from the `products` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    /// PokéAPI id; unique.
    pub external_id: i64,
    pub name: String,
    pub primary_image_url: String,
    pub sprite_front_default_url: Option<String>,
    pub sprite_back_default_url: Option<String>,
    pub sprite_front_shiny_url: Option<String>,
    pub sprite_back_shiny_url: Option<String>,
    pub description: String,
    /// `NUMERIC(6,2)`; always scale 2.
    pub price: Decimal,
    pub is_active: bool,
    pub categories: Vec<String>,
    pub stats: Json<IndexMap<String, i64>>,
    pub abilities: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The subset of `products` columns served by the list endpoint.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductSummaryRow {
    pub id: i64,
    pub external_id: i64,
    pub name: String,
    pub primary_image_url: String,
    pub description: String,
    pub price: Decimal,
    pub is_active: bool,
}

/// Result of [`upsert_product`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub id: i64,
    /// `true` when the row was inserted, `false` when an existing row with the
    /// same `external_id` was updated.
    pub created: bool,
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Inserts or updates a product keyed by `external_id`.
///
/// On conflict every mutable column is overwritten, `is_active` is reset to
/// `true`, and `updated_at` is bumped; `created_at` is left untouched.
/// `(xmax = 0)` is only true for a freshly inserted tuple, which is how the
/// created/updated distinction is reported.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails, including a unique
/// violation on `name` when another external id already owns that name.
pub async fn upsert_product(
    pool: &PgPool,
    item: &NewCatalogItem,
    price: Decimal,
) -> Result<UpsertOutcome, DbError> {
    let (id, created): (i64, bool) = sqlx::query_as(
        "INSERT INTO products \
             (external_id, name, primary_image_url, \
              sprite_front_default_url, sprite_back_default_url, \
              sprite_front_shiny_url, sprite_back_shiny_url, \
              description, price, is_active, categories, stats, abilities) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, true, $10, $11, $12) \
         ON CONFLICT (external_id) DO UPDATE SET \
             name                     = EXCLUDED.name, \
             primary_image_url        = EXCLUDED.primary_image_url, \
             sprite_front_default_url = EXCLUDED.sprite_front_default_url, \
             sprite_back_default_url  = EXCLUDED.sprite_back_default_url, \
             sprite_front_shiny_url   = EXCLUDED.sprite_front_shiny_url, \
             sprite_back_shiny_url    = EXCLUDED.sprite_back_shiny_url, \
             description              = EXCLUDED.description, \
             price                    = EXCLUDED.price, \
             is_active                = true, \
             categories               = EXCLUDED.categories, \
             stats                    = EXCLUDED.stats, \
             abilities                = EXCLUDED.abilities, \
             updated_at               = NOW() \
         RETURNING id, (xmax = 0) AS created",
    )
    .bind(item.external_id)
    .bind(&item.name)
    .bind(&item.primary_image_url)
    .bind(&item.sprite_front_default_url)
    .bind(&item.sprite_back_default_url)
    .bind(&item.sprite_front_shiny_url)
    .bind(&item.sprite_back_shiny_url)
    .bind(&item.description)
    .bind(price)
    .bind(&item.categories)
    .bind(Json(&item.stats))
    .bind(&item.abilities)
    .fetch_one(pool)
    .await?;

    Ok(UpsertOutcome { id, created })
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Total number of catalog rows, active or not.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_products(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Returns one page of product summaries in catalog order
/// (`external_id ASC`, then `id ASC`).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_products_page(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<ProductSummaryRow>, DbError> {
    let rows = sqlx::query_as::<_, ProductSummaryRow>(
        "SELECT id, external_id, name, primary_image_url, description, price, is_active \
         FROM products \
         ORDER BY external_id ASC, id ASC \
         LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Fetches a single product by its internal row id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_product(pool: &PgPool, id: i64) -> Result<Option<ProductRow>, DbError> {
    let row = sqlx::query_as::<_, ProductRow>(
        "SELECT id, external_id, name, primary_image_url, \
                sprite_front_default_url, sprite_back_default_url, \
                sprite_front_shiny_url, sprite_back_shiny_url, \
                description, price, is_active, categories, stats, abilities, \
                created_at, updated_at \
         FROM products \
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
