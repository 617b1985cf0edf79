//! End-to-end engine checks over a small fixed catalog.

use automeal_server::catalog::Catalog;
use automeal_server::error::OrderError;
use automeal_server::models::{
    DeliveryStatus, Dish, OrderItemRequest, OrderRequest, OrderStatus, Restaurant,
};
use automeal_server::orders::OrderStore;
use chrono::Duration;

fn dish(id: &str, restaurant: &str, name: &str, price: f64, prep_time_min: u32) -> Dish {
    Dish {
        dish_id: id.to_string(),
        restaurant_id: restaurant.to_string(),
        dish_name: name.to_string(),
        price,
        prep_time_min,
        tags: vec![],
        popularity_score: 0.5,
    }
}

fn restaurant(id: &str, name: &str) -> Restaurant {
    Restaurant {
        restaurant_id: id.to_string(),
        name: name.to_string(),
        cuisine_type: "italian".to_string(),
        city: "Berlin".to_string(),
        zip_code: "10115".to_string(),
        avg_rating: 4.4,
        delivery_eta: 30,
        price_min: 5.0,
        price_max: 25.0,
    }
}

fn catalog() -> Catalog {
    Catalog::new(
        vec![
            dish("D1", "R1", "Lasagna", 10.0, 20),
            dish("D2", "R1", "Bruschetta", 5.0, 10),
            dish("D3", "R2", "Pad Thai", 9.0, 15),
        ],
        vec![restaurant("R1", "Trattoria Roma"), restaurant("R2", "Thai Garden")],
    )
}

fn order_of(items: &[(&str, u32)]) -> OrderRequest {
    OrderRequest {
        items: items
            .iter()
            .map(|(dish_id, quantity)| OrderItemRequest {
                dish_id: dish_id.to_string(),
                quantity: *quantity,
            })
            .collect(),
        user_id: Some("agent-1".to_string()),
        delivery_address: Some("Friedrichstr. 1".to_string()),
    }
}

#[test]
fn worked_example_total_and_eta() {
    let catalog = catalog();
    let mut store = OrderStore::new();

    // D1 once at 10.0 plus D2 twice at 5.0 each.
    let (order, delivery) = store
        .create_order(&catalog, order_of(&[("D1", 1), ("D2", 2)]))
        .expect("valid order");

    assert_eq!(order.total_price, 20.0);
    assert_eq!(
        order.total_price,
        order.items.iter().map(|i| i.price).sum::<f64>()
    );
    assert!(order
        .items
        .iter()
        .all(|i| i.restaurant_id == order.restaurant_id));

    // Prep runs in parallel: 20 minutes, not 30.
    assert_eq!(
        order.estimated_delivery_time - order.created_at,
        Duration::minutes(20)
    );
    assert_eq!(delivery.estimated_arrival, order.estimated_delivery_time);
}

#[test]
fn mixed_restaurant_order_is_rejected_without_side_effects() {
    let catalog = catalog();
    let mut store = OrderStore::new();

    let err = store
        .create_order(&catalog, order_of(&[("D1", 1), ("D3", 1)]))
        .expect_err("must fail");
    assert!(matches!(err, OrderError::MixedRestaurants));
    assert_eq!(store.order_count(), 0);
}

#[test]
fn delivered_order_yields_delivered_delivery_record() {
    let catalog = catalog();
    let mut store = OrderStore::new();
    let (order, _) = store
        .create_order(&catalog, order_of(&[("D1", 1)]))
        .expect("valid order");

    store
        .update_status(&order.order_id, OrderStatus::Delivered)
        .expect("order exists");
    assert_eq!(
        store.delivery(&order.order_id).map(|d| d.status),
        Some(DeliveryStatus::Delivered)
    );

    // Idempotent when repeated.
    store
        .update_status(&order.order_id, OrderStatus::Delivered)
        .expect("order exists");
    assert_eq!(
        store.delivery(&order.order_id).map(|d| d.status),
        Some(DeliveryStatus::Delivered)
    );
}

#[test]
fn lookups_after_creation_see_both_records() {
    let catalog = catalog();
    let mut store = OrderStore::new();
    let (order, delivery) = store
        .create_order(&catalog, order_of(&[("D3", 2)]))
        .expect("valid order");

    assert_eq!(store.order(&order.order_id), Some(&order));
    assert_eq!(store.delivery(&order.order_id), Some(&delivery));
    assert!(store.order("ord_UNKNOWN0").is_none());
    assert!(store.delivery("ord_UNKNOWN0").is_none());
}
