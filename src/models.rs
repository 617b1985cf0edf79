use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    OutForDelivery,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Pending,
    Assigned,
    PickedUp,
    InTransit,
    Delivered,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Dish {
    /// Unique identifier for the dish
    pub dish_id: String,
    /// Restaurant offering this dish
    pub restaurant_id: String,
    /// Name of the dish
    pub dish_name: String,
    /// Price in dollars
    pub price: f64,
    /// Preparation time in minutes
    pub prep_time_min: u32,
    /// Lowercase tags (e.g. vegan, spicy)
    pub tags: Vec<String>,
    /// Popularity score between 0 and 1
    pub popularity_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Restaurant {
    /// Unique identifier for the restaurant
    pub restaurant_id: String,
    /// Name of the restaurant
    pub name: String,
    /// Cuisine type (e.g. italian, korean)
    pub cuisine_type: String,
    /// City the restaurant operates in
    pub city: String,
    /// Postal code
    pub zip_code: String,
    /// Average customer rating
    pub avg_rating: f64,
    /// Typical delivery ETA in minutes
    pub delivery_eta: u32,
    /// Cheapest dish price
    pub price_min: f64,
    /// Most expensive dish price
    pub price_max: f64,
}

/// Restaurant listing entry with its dish count, computed on demand.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RestaurantSummary {
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub cuisine_type: String,
    pub city: String,
    pub avg_rating: f64,
    pub dish_count: usize,
}

/// Line item within an order. Dish and restaurant names are snapshots taken
/// at order time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub dish_id: String,
    pub dish_name: String,
    pub quantity: u32,
    /// Line price: unit price times quantity
    pub price: f64,
    pub restaurant_id: String,
    pub restaurant_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub order_id: String,
    pub user_id: Option<String>,
    pub items: Vec<OrderItem>,
    /// Sum of the line prices
    pub total_price: f64,
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub estimated_delivery_time: DateTime<Utc>,
    pub delivery_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeliveryInfo {
    pub delivery_id: String,
    pub order_id: String,
    pub status: DeliveryStatus,
    /// Courier name, unassigned in this simulation
    pub driver_name: Option<String>,
    /// Courier phone, unassigned in this simulation
    pub driver_phone: Option<String>,
    pub estimated_arrival: DateTime<Utc>,
    pub current_location: Option<String>,
    pub tracking_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItemRequest {
    /// Dish to order; an empty or missing id is rejected
    #[serde(default)]
    pub dish_id: String,
    /// Number of units, defaults to 1
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderRequest {
    pub items: Vec<OrderItemRequest>,
    pub user_id: Option<String>,
    pub delivery_address: Option<String>,
}

/// Conjunctive dish filter; omitted fields are not applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct DishSearchRequest {
    /// Case-insensitive substring match against the dish name
    pub dish_name: Option<String>,
    /// Exact restaurant match
    pub restaurant_id: Option<String>,
    /// At least one of these tags must match (case-insensitive)
    pub tags: Option<Vec<String>>,
    /// Maximum price in dollars
    pub max_price: Option<f64>,
    /// Minimum popularity score (0-1)
    pub min_popularity_score: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderResponse {
    pub order: Order,
    pub delivery: DeliveryInfo,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub service: String,
    pub dishes_count: usize,
    pub restaurants_count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
}
