//! Order models and derived dashboard statistics

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
    Refunded,
}

/// An order placed with a business
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: i64,
    #[serde(default)]
    pub order_number: Option<String>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Count and amount for one status bucket
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StatusTotals {
    pub count: u32,
    pub amount: Decimal,
}

/// Aggregates shown on the dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrderStats {
    pub total_orders: u32,
    pub by_status: BTreeMap<OrderStatus, StatusTotals>,
    /// Sum of completed orders
    pub revenue: Decimal,
    /// Sum of orders not yet completed or cancelled
    pub outstanding: Decimal,
}

impl OrderStats {
    pub fn from_orders(orders: &[Order]) -> Self {
        let mut stats = OrderStats::default();

        for order in orders {
            stats.total_orders += 1;
            let bucket = stats.by_status.entry(order.status).or_default();
            bucket.count += 1;
            bucket.amount += order.total_amount;

            match order.status {
                OrderStatus::Completed => stats.revenue += order.total_amount,
                OrderStatus::Pending | OrderStatus::Processing => {
                    stats.outstanding += order.total_amount
                }
                OrderStatus::Cancelled | OrderStatus::Refunded => {}
            }
        }

        stats
    }

    pub fn count(&self, status: OrderStatus) -> u32 {
        self.by_status.get(&status).map_or(0, |t| t.count)
    }

    pub fn amount(&self, status: OrderStatus) -> Decimal {
        self.by_status
            .get(&status)
            .map_or(Decimal::ZERO, |t| t.amount)
    }
}
