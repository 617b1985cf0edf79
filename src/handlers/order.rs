use axum::{
    Router,
    extract::{Path, State},
    response::Json,
    routing::{get, patch, post},
};
use tracing::instrument;

use crate::error::{ApiError, OrderError};
use crate::models::{
    ApiErrorResponse, CreateOrderResponse, DeliveryInfo, Order, OrderRequest,
    UpdateOrderStatusRequest,
};

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", post(create_order))
        .route("/orders/{id}", get(get_order))
        .route("/orders/{id}/delivery", get(get_delivery))
        .route("/orders/{id}/status", patch(update_order_status))
}

#[utoipa::path(
    post,
    path = "/orders",
    request_body = OrderRequest,
    responses(
        (status = 200, description = "Order created with its delivery record", body = CreateOrderResponse),
        (status = 400, description = "Invalid order", body = ApiErrorResponse),
        (status = 404, description = "Unknown dish or restaurant", body = ApiErrorResponse),
    ),
    tag = "orders"
)]
#[instrument(skip(state, payload))]
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<OrderRequest>,
) -> Result<Json<CreateOrderResponse>, ApiError> {
    let mut orders = state.orders.lock().await;
    let (order, delivery) = orders.create_order(&state.catalog, payload)?;
    tracing::info!(order_id = %order.order_id, total = order.total_price, "order created");
    Ok(Json(CreateOrderResponse { order, delivery }))
}

#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = String, Path, description = "Order identifier"),
    ),
    responses(
        (status = 200, description = "Order details", body = Order),
        (status = 404, description = "Order not found", body = ApiErrorResponse),
    ),
    tag = "orders"
)]
#[instrument(skip(state))]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let orders = state.orders.lock().await;
    let order = orders
        .order(&id)
        .cloned()
        .ok_or(OrderError::OrderNotFound(id))?;
    Ok(Json(order))
}

#[utoipa::path(
    get,
    path = "/orders/{id}/delivery",
    params(
        ("id" = String, Path, description = "Order identifier"),
    ),
    responses(
        (status = 200, description = "Delivery record for the order", body = DeliveryInfo),
        (status = 404, description = "Delivery record not found", body = ApiErrorResponse),
    ),
    tag = "orders"
)]
#[instrument(skip(state))]
pub async fn get_delivery(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeliveryInfo>, ApiError> {
    let orders = state.orders.lock().await;
    let delivery = orders
        .delivery(&id)
        .cloned()
        .ok_or(OrderError::DeliveryNotFound(id))?;
    Ok(Json(delivery))
}

#[utoipa::path(
    patch,
    path = "/orders/{id}/status",
    params(
        ("id" = String, Path, description = "Order identifier"),
    ),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Updated order", body = Order),
        (status = 404, description = "Order not found", body = ApiErrorResponse),
    ),
    tag = "orders"
)]
#[instrument(skip(state))]
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> Result<Json<Order>, ApiError> {
    let mut orders = state.orders.lock().await;
    let order = orders.update_status(&id, payload.status)?;
    tracing::info!(order_id = %id, status = ?payload.status, "order status updated");
    Ok(Json(order))
}
