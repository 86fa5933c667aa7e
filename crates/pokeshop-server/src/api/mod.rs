mod pagination;
mod placeholders;
mod products;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// Rows per page on the product list; at least 1.
    pub page_size: i64,
}

/// Error response. The body is `{"detail": "..."}` with a matching status.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: &'static str,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

impl ApiError {
    pub(super) fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            detail: "Not found.",
        }
    }

    pub(super) fn invalid_page() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            detail: "Invalid page.",
        }
    }

    pub(super) fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: "A server error occurred.",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (
            self.status,
            Json(ErrorBody {
                detail: self.detail,
            }),
        )
            .into_response()
    }
}

pub(super) fn map_db_error(request_id: &str, error: &pokeshop_db::DbError) -> ApiError {
    tracing::error!(request_id, error = %error, "database query failed");
    ApiError::internal()
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/products/", get(products::list_products))
        .route("/products/{id}/", get(products::get_product))
        .route("/cart/", get(placeholders::cart))
        .route("/cart/{*rest}", get(placeholders::cart))
        .route("/orders/", get(placeholders::orders))
        .route("/orders/{*rest}", get(placeholders::orders))
        .route("/users/", get(placeholders::users))
        .route("/users/{*rest}", get(placeholders::users))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match pokeshop_db::ping(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthData {
                status: "ok",
                database: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthData {
                    status: "degraded",
                    database: "unavailable",
                }),
            )
        }
    }
}
