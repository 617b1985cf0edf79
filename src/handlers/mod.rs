pub mod dish;
pub mod order;
pub mod restaurant;

// Re-export routers for easier importing
pub use dish::router as dish_router;
pub use order::router as order_router;
pub use restaurant::router as restaurant_router;

use std::sync::Arc;

use axum::{extract::State, response::Json};
use chrono::Utc;
use tokio::sync::Mutex;
use utoipa::OpenApi;

use crate::catalog::Catalog;
use crate::models::HealthResponse;
use crate::orders::OrderStore;

#[derive(Clone)]
pub struct AppState {
    /// Read-only after startup; shared without locking.
    pub catalog: Arc<Catalog>,
    /// Order and delivery tables behind a single coarse mutex.
    pub orders: Arc<Mutex<OrderStore>>,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            orders: Arc::new(Mutex::new(OrderStore::new())),
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health", body = HealthResponse),
    ),
    tag = "health"
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        service: "AutoMeal Order Server".to_string(),
        dishes_count: state.catalog.dishes().len(),
        restaurants_count: state.catalog.restaurants().len(),
    })
}

#[derive(OpenApi)]
#[openapi(
    paths(
        dish::list_dishes,
        dish::search_dishes,
        dish::get_dish,
        restaurant::list_restaurants,
        restaurant::get_restaurant,
        order::create_order,
        order::get_order,
        order::get_delivery,
        order::update_order_status,
        health,
    ),
    components(
        schemas(
            crate::models::Dish,
            crate::models::Restaurant,
            crate::models::RestaurantSummary,
            crate::models::DishSearchRequest,
            crate::models::OrderItemRequest,
            crate::models::OrderRequest,
            crate::models::OrderItem,
            crate::models::Order,
            crate::models::OrderStatus,
            crate::models::DeliveryInfo,
            crate::models::DeliveryStatus,
            crate::models::UpdateOrderStatusRequest,
            crate::models::CreateOrderResponse,
            crate::models::HealthResponse,
            crate::models::ApiErrorResponse
        )
    ),
    tags(
        (name = "dishes", description = "Dish catalog and search endpoints"),
        (name = "restaurants", description = "Restaurant listing endpoints"),
        (name = "orders", description = "Order placement and tracking endpoints"),
        (name = "health", description = "Service health endpoint")
    ),
    info(
        title = "AutoMeal Order Server",
        description = "Food ordering backend with an agent-facing RPC channel",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;
