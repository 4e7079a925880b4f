use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

string_enum!(
    OrderStatus {
        Pending => "pending",
        Processing => "processing",
        Shipped => "shipped",
        Delivered => "delivered",
        Cancelled => "cancelled",
    }
);

impl OrderStatus {
    /// Position along the fulfilment path. Cancelled sits outside it.
    fn stage(&self) -> Option<u8> {
        match self {
            OrderStatus::Pending => Some(0),
            OrderStatus::Processing => Some(1),
            OrderStatus::Shipped => Some(2),
            OrderStatus::Delivered => Some(3),
            OrderStatus::Cancelled => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Forward moves (skips allowed) and cancellation of an open order.
    /// Re-applying the current status is always accepted.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        if *self == next {
            return true;
        }
        if self.is_terminal() {
            return false;
        }
        match (self.stage(), next.stage()) {
            (_, None) => true,
            (Some(from), Some(to)) => to > from,
            (None, Some(_)) => false,
        }
    }
}

/// One line of an order. Product data is copied in, not referenced.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OrderItem {
    pub id: String,
    pub name: String,
    pub quantity: i32,
    pub price: f64,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    #[sqlx(json)]
    pub products: Vec<OrderItem>,
    pub total: f64,
    #[sqlx(try_from = "String")]
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(user_id: String, user_name: String, products: Vec<OrderItem>, status: OrderStatus) -> Self {
        let total = order_total(&products);
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            user_name,
            products,
            total,
            status,
            created_at: Utc::now(),
        }
    }
}

/// Sum of quantity x unit price, rounded to cents.
pub fn order_total(items: &[OrderItem]) -> f64 {
    let raw: f64 = items.iter().map(|i| i.quantity as f64 * i.price).sum();
    (raw * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    fn item(quantity: i32, price: f64) -> OrderItem {
        OrderItem { id: "p".into(), name: "Widget".into(), quantity, price }
    }

    #[test]
    fn test_total_rounds_to_cents() {
        assert_eq!(order_total(&[]), 0.0);
        assert_eq!(order_total(&[item(3, 19.99), item(1, 0.1)]), 60.07);
        assert_eq!(order_total(&[item(3, 0.1)]), 0.3);
    }

    #[test]
    fn test_new_order_computes_total() {
        let order = Order::new("u1".into(), "Ada".into(), vec![item(2, 10.5), item(1, 4.0)], Pending);
        assert_eq!(order.total, 25.0);
        assert_eq!(order.status, Pending);
    }

    #[test]
    fn test_forward_transitions() {
        assert!(Pending.can_transition_to(Processing));
        assert!(Pending.can_transition_to(Shipped));
        assert!(Processing.can_transition_to(Delivered));
        assert!(Shipped.can_transition_to(Delivered));
        assert!(!Shipped.can_transition_to(Pending));
        assert!(!Processing.can_transition_to(Pending));
    }

    #[test]
    fn test_cancellation_and_terminal_states() {
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Shipped.can_transition_to(Cancelled));
        assert!(!Delivered.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
        assert!(!Delivered.can_transition_to(Shipped));
        assert!(Delivered.can_transition_to(Delivered));
        assert!(Cancelled.can_transition_to(Cancelled));
    }

    #[test]
    fn test_order_serializes_camel_case() {
        let order = Order::new("u1".into(), "Ada".into(), vec![item(1, 2.0)], Processing);
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["userName"], "Ada");
        assert_eq!(json["status"], "processing");
        assert_eq!(json["products"][0]["quantity"], 1);
    }
}
