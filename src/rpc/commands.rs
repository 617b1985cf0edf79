use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::models::{DishSearchRequest, OrderRequest, OrderStatus};

/// A decoded command with its typed parameters. Wire method names that do
/// not correspond to a variant are rejected before dispatch.
#[derive(Debug)]
pub enum Command {
    SearchDishes(DishSearchRequest),
    GetDish(GetDishParams),
    ListDishes,
    ListRestaurants,
    GetRestaurant(GetRestaurantParams),
    CreateOrder(OrderRequest),
    GetOrder(GetOrderParams),
    GetDelivery(GetOrderParams),
    UpdateOrderStatus(UpdateOrderStatusParams),
    Manifest,
}

#[derive(Debug, Deserialize)]
pub struct GetDishParams {
    pub dish_id: String,
}

#[derive(Debug, Deserialize)]
pub struct GetRestaurantParams {
    pub restaurant_id: String,
}

#[derive(Debug, Deserialize)]
pub struct GetOrderParams {
    pub order_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusParams {
    pub order_id: String,
    pub status: OrderStatus,
}

#[derive(Debug)]
pub enum CommandError {
    UnknownMethod,
    InvalidParams(serde_json::Error),
}

impl Command {
    pub fn parse(method: &str, params: Value) -> Result<Self, CommandError> {
        match method {
            "search_dishes" => Ok(Command::SearchDishes(typed(params)?)),
            "get_dish" => Ok(Command::GetDish(typed(params)?)),
            "list_dishes" => Ok(Command::ListDishes),
            "list_restaurants" => Ok(Command::ListRestaurants),
            "get_restaurant" => Ok(Command::GetRestaurant(typed(params)?)),
            "create_order" => Ok(Command::CreateOrder(typed(params)?)),
            "get_order" => Ok(Command::GetOrder(typed(params)?)),
            "get_delivery" => Ok(Command::GetDelivery(typed(params)?)),
            "update_order_status" => Ok(Command::UpdateOrderStatus(typed(params)?)),
            "manifest" => Ok(Command::Manifest),
            _ => Err(CommandError::UnknownMethod),
        }
    }
}

fn typed<T: DeserializeOwned>(params: Value) -> Result<T, CommandError> {
    serde_json::from_value(params).map_err(CommandError::InvalidParams)
}

/// Static description of the server and its command catalog.
pub fn manifest() -> Value {
    json!({
        "name": "AutoMeal Order Server",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Food ordering backend with an agent-facing RPC channel",
        "protocol": "jsonrpc-2.0",
        "methods": [
            {
                "name": "search_dishes",
                "description": "Search dishes by name, restaurant, tags, price, or popularity",
                "params": {
                    "dish_name": "string, optional",
                    "restaurant_id": "string, optional",
                    "tags": "string array, optional",
                    "max_price": "number, optional",
                    "min_popularity_score": "number, optional"
                }
            },
            {
                "name": "get_dish",
                "description": "Get a dish by id",
                "params": { "dish_id": "string, required" }
            },
            {
                "name": "list_dishes",
                "description": "List every dish in the catalog",
                "params": {}
            },
            {
                "name": "list_restaurants",
                "description": "List restaurants with their dish counts",
                "params": {}
            },
            {
                "name": "get_restaurant",
                "description": "Get a restaurant by id",
                "params": { "restaurant_id": "string, required" }
            },
            {
                "name": "create_order",
                "description": "Place an order for dishes from a single restaurant",
                "params": {
                    "items": "array of {dish_id, quantity?}, required",
                    "user_id": "string, optional",
                    "delivery_address": "string, optional"
                }
            },
            {
                "name": "get_order",
                "description": "Get an order by id",
                "params": { "order_id": "string, required" }
            },
            {
                "name": "get_delivery",
                "description": "Get the delivery record for an order",
                "params": { "order_id": "string, required" }
            },
            {
                "name": "update_order_status",
                "description": "Overwrite an order's status and rederive its delivery status",
                "params": { "order_id": "string, required", "status": "order status, required" }
            },
            {
                "name": "manifest",
                "description": "This document",
                "params": {}
            }
        ]
    })
}
