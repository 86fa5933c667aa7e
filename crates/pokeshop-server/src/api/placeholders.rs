//! Stub endpoints reserving the cart, orders and users namespaces. They
//! return a fixed acknowledgment and do nothing else.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(super) struct Acknowledgment {
    pub message: &'static str,
}

pub(super) async fn cart() -> Json<Acknowledgment> {
    Json(Acknowledgment {
        message: "CART_TEST",
    })
}

pub(super) async fn orders() -> Json<Acknowledgment> {
    Json(Acknowledgment {
        message: "ORDERS_TEST",
    })
}

pub(super) async fn users() -> Json<Acknowledgment> {
    Json(Acknowledgment {
        message: "USERS_APP_TEST",
    })
}
