//! Funnel catalog route handler.

use axum::response::{IntoResponse, Response};
use pulseboard_core::Funnel;

use super::ApiResponse;

/// Every selectable funnel, with the count in `total`.
pub async fn index() -> Response {
    let catalog = Funnel::catalog();
    let total = catalog.len();
    ApiResponse::ok(catalog).with_total(total).into_response()
}
