use crate::models::{DeliveryStatus, OrderStatus};

/// Delivery status implied by an order status. `None` leaves the delivery
/// record untouched (pending and cancelled orders carry no courier signal).
///
/// The mapping is one-directional and idempotent; it is applied from the
/// single status-update path in the order store.
pub fn delivery_status_for(status: OrderStatus) -> Option<DeliveryStatus> {
    match status {
        OrderStatus::Confirmed | OrderStatus::Preparing => Some(DeliveryStatus::Assigned),
        OrderStatus::Ready => Some(DeliveryStatus::PickedUp),
        OrderStatus::OutForDelivery => Some(DeliveryStatus::InTransit),
        OrderStatus::Delivered => Some(DeliveryStatus::Delivered),
        OrderStatus::Pending | OrderStatus::Cancelled => None,
    }
}
