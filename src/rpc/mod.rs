//! JSON-RPC 2.0 command channel for agent clients, served over a WebSocket
//! upgrade. Messages on one connection are processed strictly in order; a
//! message without an `id` is fire-and-forget and never produces a reply,
//! for results and errors alike.

pub mod commands;

use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::error::OrderError;
use crate::handlers::AppState;

use commands::{Command, CommandError};

// JSON-RPC reserved codes, plus server-range codes for the domain classes.
// Stable once published.
pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;
pub const VALIDATION_FAILED: i64 = -32000;
pub const NOT_FOUND: i64 = -32001;

#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    /// Correlation token, echoed back verbatim. Absent means fire-and-forget.
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl RpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(code: i64, message: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data.into()),
        }
    }
}

impl From<OrderError> for RpcError {
    fn from(err: OrderError) -> Self {
        let code = if err.is_not_found() {
            NOT_FOUND
        } else {
            VALIDATION_FAILED
        };
        Self::new(code, err.to_string())
    }
}

#[derive(Debug, Serialize)]
pub struct RpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    fn result(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(error),
        }
    }
}

pub async fn rpc_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| serve_connection(socket, state))
}

async fn serve_connection(mut socket: WebSocket, state: AppState) {
    info!("rpc connection established");
    while let Some(Ok(message)) = socket.recv().await {
        match message {
            Message::Text(text) => {
                let Some(reply) = handle_message(&state, &text).await else {
                    continue;
                };
                let payload = match serde_json::to_string(&reply) {
                    Ok(payload) => payload,
                    Err(e) => {
                        warn!(error = %e, "failed to serialize rpc reply");
                        continue;
                    }
                };
                if socket.send(Message::Text(payload.into())).await.is_err() {
                    break;
                }
            }
            Message::Binary(_) => warn!("ignoring binary rpc frame"),
            Message::Close(_) => break,
            _ => {}
        }
    }
    info!("rpc connection closed");
}

/// Processes one frame. `None` means no reply is owed.
pub async fn handle_message(state: &AppState, text: &str) -> Option<RpcResponse> {
    let request: RpcRequest = match serde_json::from_str(text) {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "unparseable rpc frame");
            return Some(RpcResponse::error(
                Value::Null,
                RpcError::with_data(PARSE_ERROR, "Parse error", e.to_string()),
            ));
        }
    };

    let id = request.id;

    if request.jsonrpc.as_deref() != Some("2.0") {
        return Some(RpcResponse::error(
            id?,
            RpcError::new(INVALID_REQUEST, "Invalid request: expected jsonrpc \"2.0\""),
        ));
    }

    let params = request.params.unwrap_or_else(|| json!({}));
    let outcome = match Command::parse(&request.method, params) {
        Ok(command) => execute(state, command).await,
        Err(CommandError::UnknownMethod) => Err(RpcError::new(
            METHOD_NOT_FOUND,
            format!("Method {} not found", request.method),
        )),
        Err(CommandError::InvalidParams(e)) => Err(RpcError::with_data(
            INVALID_PARAMS,
            "Invalid params",
            e.to_string(),
        )),
    };

    // Fire-and-forget: the operation already ran, but nothing is sent back.
    let id = id?;
    Some(match outcome {
        Ok(result) => RpcResponse::result(id, result),
        Err(error) => RpcResponse::error(id, error),
    })
}

async fn execute(state: &AppState, command: Command) -> Result<Value, RpcError> {
    match command {
        Command::SearchDishes(filter) => encode(&state.catalog.search(&filter)),
        Command::GetDish(params) => {
            let dish = state.catalog.dish(&params.dish_id).ok_or_else(|| {
                RpcError::new(NOT_FOUND, format!("dish {} not found", params.dish_id))
            })?;
            encode(dish)
        }
        Command::ListDishes => encode(&state.catalog.dishes()),
        Command::ListRestaurants => encode(&state.catalog.restaurant_summaries()),
        Command::GetRestaurant(params) => {
            let restaurant = state.catalog.restaurant(&params.restaurant_id).ok_or_else(|| {
                RpcError::new(
                    NOT_FOUND,
                    format!("restaurant {} not found", params.restaurant_id),
                )
            })?;
            encode(restaurant)
        }
        Command::CreateOrder(request) => {
            let mut orders = state.orders.lock().await;
            let (order, delivery) = orders
                .create_order(&state.catalog, request)
                .map_err(RpcError::from)?;
            info!(order_id = %order.order_id, "order created over rpc");
            Ok(json!({ "order": order, "delivery": delivery }))
        }
        Command::GetOrder(params) => {
            let orders = state.orders.lock().await;
            let order = orders
                .order(&params.order_id)
                .ok_or_else(|| RpcError::from(OrderError::OrderNotFound(params.order_id.clone())))?;
            encode(order)
        }
        Command::GetDelivery(params) => {
            let orders = state.orders.lock().await;
            let delivery = orders.delivery(&params.order_id).ok_or_else(|| {
                RpcError::from(OrderError::DeliveryNotFound(params.order_id.clone()))
            })?;
            encode(delivery)
        }
        Command::UpdateOrderStatus(params) => {
            let mut orders = state.orders.lock().await;
            let order = orders
                .update_status(&params.order_id, params.status)
                .map_err(RpcError::from)?;
            info!(order_id = %params.order_id, status = ?params.status, "order status updated over rpc");
            encode(&order)
        }
        Command::Manifest => Ok(commands::manifest()),
    }
}

// Serialization of engine output is the only fault this gateway cannot
// classify; it surfaces as a generic internal error.
fn encode<T: Serialize>(value: &T) -> Result<Value, RpcError> {
    serde_json::to_value(value)
        .map_err(|e| RpcError::with_data(INTERNAL_ERROR, "Internal error", e.to_string()))
}
