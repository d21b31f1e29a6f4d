//! Product handlers for the REST API.
//!
//! Every handler takes the caller's [`Session`] first so that a missing
//! `X-Session-ID` is rejected before the body is read or storage is touched.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use serde_json::{Value, json};

use pricewatch_types::product::{CreateProductRequest, PriceRecordView, ProductId, ProductView};

use crate::http::error::AppError;
use crate::http::extractors::session::Session;
use crate::state::AppState;

/// POST /products/ - Start monitoring a URL.
pub async fn create_product(
    State(state): State<AppState>,
    Session(owner): Session,
    body: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<Json<ProductView>, AppError> {
    let Json(body) = body.map_err(|e| AppError::Unprocessable(e.body_text()))?;
    let product = state.product_service.add_product(&owner, &body.url).await?;
    Ok(Json(product.into()))
}

/// GET /products/ - List the caller's products.
pub async fn list_products(
    State(state): State<AppState>,
    Session(owner): Session,
) -> Result<Json<Vec<ProductView>>, AppError> {
    let products = state.product_service.list_products(&owner).await?;
    Ok(Json(products.into_iter().map(ProductView::from).collect()))
}

/// DELETE /products/{product_id} - Stop monitoring and drop the history.
pub async fn delete_product(
    State(state): State<AppState>,
    Session(owner): Session,
    id: Result<Path<ProductId>, PathRejection>,
) -> Result<Json<Value>, AppError> {
    let Path(id) = id.map_err(|e| AppError::Unprocessable(e.body_text()))?;
    state.product_service.remove_product(&owner, id).await?;
    Ok(Json(json!({ "message": "Product deleted" })))
}

/// GET /products/{product_id}/price-history - Recorded prices, oldest first.
pub async fn price_history(
    State(state): State<AppState>,
    Session(owner): Session,
    id: Result<Path<ProductId>, PathRejection>,
) -> Result<Json<Vec<PriceRecordView>>, AppError> {
    let Path(id) = id.map_err(|e| AppError::Unprocessable(e.body_text()))?;
    let records = state.product_service.price_history(&owner, id).await?;
    Ok(Json(records.into_iter().map(PriceRecordView::from).collect()))
}
