use std::collections::HashMap;

use chrono::{Duration, Utc};
use rand::Rng;

use crate::catalog::Catalog;
use crate::delivery::delivery_status_for;
use crate::error::OrderError;
use crate::models::{
    DeliveryInfo, DeliveryStatus, Order, OrderItem, OrderRequest, OrderStatus,
};

const ORDER_ID_PREFIX: &str = "ord_";
const ORDER_TOKEN_LEN: usize = 8;
const ORDER_TOKEN_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Owns the order and delivery tables. Shared behind a single mutex; every
/// method runs to completion under one lock acquisition, which makes id
/// allocation and the order/delivery pair insertion atomic.
#[derive(Default)]
pub struct OrderStore {
    orders: HashMap<String, Order>,
    deliveries: HashMap<String, DeliveryInfo>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the request against the catalog, prices it, and inserts the
    /// order together with its pending delivery record.
    pub fn create_order(
        &mut self,
        catalog: &Catalog,
        request: OrderRequest,
    ) -> Result<(Order, DeliveryInfo), OrderError> {
        if request.items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        let mut items = Vec::with_capacity(request.items.len());
        let mut restaurant: Option<(String, String)> = None;
        let mut total_price = 0.0;
        let mut max_prep_time = 0u32;

        for item in &request.items {
            if item.dish_id.is_empty() {
                return Err(OrderError::MissingDishId);
            }
            let dish = catalog
                .dish(&item.dish_id)
                .ok_or_else(|| OrderError::DishNotFound(item.dish_id.clone()))?;
            let dish_restaurant = catalog
                .restaurant(&dish.restaurant_id)
                .ok_or_else(|| OrderError::RestaurantNotFound(dish.restaurant_id.clone()))?;

            match &restaurant {
                None => {
                    restaurant = Some((
                        dish_restaurant.restaurant_id.clone(),
                        dish_restaurant.name.clone(),
                    ))
                }
                Some((restaurant_id, _)) if *restaurant_id != dish.restaurant_id => {
                    return Err(OrderError::MixedRestaurants)
                }
                Some(_) => {}
            }

            let line_price = dish.price * f64::from(item.quantity);
            total_price += line_price;
            max_prep_time = max_prep_time.max(dish.prep_time_min);
            items.push(OrderItem {
                dish_id: dish.dish_id.clone(),
                dish_name: dish.dish_name.clone(),
                quantity: item.quantity,
                price: line_price,
                restaurant_id: dish.restaurant_id.clone(),
                restaurant_name: dish_restaurant.name.clone(),
            });
        }

        let (restaurant_id, restaurant_name) = restaurant.ok_or(OrderError::EmptyOrder)?;

        let now = Utc::now();
        // Dishes are prepared in parallel, so the slowest one dominates.
        let estimated_delivery = now + Duration::minutes(i64::from(max_prep_time));
        let order_id = self.allocate_order_id();

        let order = Order {
            order_id: order_id.clone(),
            user_id: request.user_id,
            items,
            total_price,
            restaurant_id,
            restaurant_name,
            status: OrderStatus::Pending,
            created_at: now,
            estimated_delivery_time: estimated_delivery,
            delivery_address: request.delivery_address,
        };
        let delivery = DeliveryInfo {
            delivery_id: format!("del_{order_id}"),
            order_id: order_id.clone(),
            status: DeliveryStatus::Pending,
            driver_name: None,
            driver_phone: None,
            estimated_arrival: estimated_delivery,
            current_location: None,
            tracking_url: None,
        };

        // Both records become visible within the same lock scope.
        self.orders.insert(order_id.clone(), order.clone());
        self.deliveries.insert(order_id, delivery.clone());

        Ok((order, delivery))
    }

    pub fn order(&self, order_id: &str) -> Option<&Order> {
        self.orders.get(order_id)
    }

    pub fn delivery(&self, order_id: &str) -> Option<&DeliveryInfo> {
        self.deliveries.get(order_id)
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Overwrites the order status and rederives the delivery status.
    /// Transition legality is not enforced; callers are trusted.
    pub fn update_status(
        &mut self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Order, OrderError> {
        let order = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))?;
        order.status = status;

        if let Some(delivery) = self.deliveries.get_mut(order_id) {
            if let Some(delivery_status) = delivery_status_for(status) {
                delivery.status = delivery_status;
            }
        }

        Ok(order.clone())
    }

    /// Allocation runs under the same lock as insertion, so a token that was
    /// free when checked stays free until the order is stored.
    fn allocate_order_id(&self) -> String {
        let mut rng = rand::rng();
        loop {
            let token: String = (0..ORDER_TOKEN_LEN)
                .map(|_| {
                    ORDER_TOKEN_ALPHABET[rng.random_range(0..ORDER_TOKEN_ALPHABET.len())] as char
                })
                .collect();
            let order_id = format!("{ORDER_ID_PREFIX}{token}");
            if !self.orders.contains_key(&order_id) {
                return order_id;
            }
        }
    }
}
