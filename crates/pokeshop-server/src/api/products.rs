use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use pokeshop_db::{ProductRow, ProductSummaryRow};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::pagination::{page_link, resolve_page, Page};
use super::{map_db_error, ApiError, AppState};

const PRODUCTS_PATH: &str = "/products/";

/// List projection of a catalog row.
#[derive(Debug, Serialize, PartialEq)]
pub(super) struct ProductSummary {
    pub id: i64,
    pub external_id: i64,
    pub name: String,
    pub primary_image_url: String,
    pub description: String,
    pub price: Decimal,
    pub is_active: bool,
}

/// Detail projection: every stored column.
#[derive(Debug, Serialize)]
pub(super) struct ProductDetail {
    pub id: i64,
    pub external_id: i64,
    pub name: String,
    pub primary_image_url: String,
    pub sprite_front_default_url: Option<String>,
    pub sprite_back_default_url: Option<String>,
    pub sprite_front_shiny_url: Option<String>,
    pub sprite_back_shiny_url: Option<String>,
    pub description: String,
    pub price: Decimal,
    pub is_active: bool,
    pub categories: Vec<String>,
    pub stats: IndexMap<String, i64>,
    pub abilities: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductSummary {
    pub(super) fn from_row(row: ProductSummaryRow) -> Self {
        Self {
            id: row.id,
            external_id: row.external_id,
            name: row.name,
            primary_image_url: row.primary_image_url,
            description: row.description,
            price: row.price,
            is_active: row.is_active,
        }
    }
}

impl ProductDetail {
    pub(super) fn from_row(row: ProductRow) -> Self {
        Self {
            id: row.id,
            external_id: row.external_id,
            name: row.name,
            primary_image_url: row.primary_image_url,
            sprite_front_default_url: row.sprite_front_default_url,
            sprite_back_default_url: row.sprite_back_default_url,
            sprite_front_shiny_url: row.sprite_front_shiny_url,
            sprite_back_shiny_url: row.sprite_back_shiny_url,
            description: row.description,
            price: row.price,
            is_active: row.is_active,
            categories: row.categories,
            stats: row.stats.0,
            abilities: row.abilities,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ProductListQuery {
    pub page: Option<String>,
}

pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<Page<ProductSummary>>, ApiError> {
    let count = pokeshop_db::count_products(&state.pool)
        .await
        .map_err(|e| map_db_error(&req_id.0, &e))?;

    let window = resolve_page(query.page.as_deref(), count, state.page_size)
        .map_err(|_| ApiError::invalid_page())?;

    let rows = pokeshop_db::list_products_page(&state.pool, window.limit, window.offset)
        .await
        .map_err(|e| map_db_error(&req_id.0, &e))?;

    let base_url = products_base_url(&headers);
    Ok(Json(Page {
        count,
        next: window.next_page().map(|p| page_link(&base_url, p)),
        previous: window.previous_page().map(|p| page_link(&base_url, p)),
        results: rows.into_iter().map(ProductSummary::from_row).collect(),
    }))
}

pub(super) async fn get_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(raw_id): Path<String>,
) -> Result<Json<ProductDetail>, ApiError> {
    // Only positive integers name a product; anything else is simply absent.
    let id = raw_id
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(ApiError::not_found)?;

    let row = pokeshop_db::get_product(&state.pool, id)
        .await
        .map_err(|e| map_db_error(&req_id.0, &e))?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(ProductDetail::from_row(row)))
}

fn products_base_url(headers: &HeaderMap) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    format!("http://{host}{PRODUCTS_PATH}")
}
