//! Business dashboard
//!
//! The initial mount fires its GETs concurrently; each one fills its own slice
//! of state and a failing request does not hide the others. Authorization
//! failures are reported so the UI can send the user to sign in.

use chrono::{DateTime, Utc};
use shared::{unread_count, Notification, Order, OrderStats, Voucher};

use super::Feedback;
use crate::error::{ClientError, ErrorKind};
use crate::external::MarketplaceApi;

/// Independently loaded parts of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardSlice {
    Orders,
    Notifications,
    Vouchers,
}

pub struct DashboardController<A> {
    api: A,
    orders: Vec<Order>,
    notifications: Vec<Notification>,
    vouchers: Vec<Voucher>,
    failures: Vec<DashboardSlice>,
    feedback: Feedback,
}

impl<A: MarketplaceApi> DashboardController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            orders: Vec::new(),
            notifications: Vec::new(),
            vouchers: Vec::new(),
            failures: Vec::new(),
            feedback: Feedback::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut Feedback {
        &mut self.feedback
    }

    pub async fn load(&mut self) {
        let (orders, notifications, vouchers) = tokio::join!(
            self.api.list_orders(),
            self.api.list_notifications(),
            self.api.list_vouchers(),
        );

        self.failures.clear();

        match orders {
            Ok(orders) => self.orders = orders,
            Err(e) => self.slice_failed(DashboardSlice::Orders, &e),
        }
        match notifications {
            Ok(notifications) => self.notifications = notifications,
            Err(e) => self.slice_failed(DashboardSlice::Notifications, &e),
        }
        match vouchers {
            Ok(vouchers) => self.vouchers = vouchers,
            Err(e) => self.slice_failed(DashboardSlice::Vouchers, &e),
        }

        tracing::debug!(
            "Dashboard loaded: {} orders, {} notifications, {} vouchers",
            self.orders.len(),
            self.notifications.len(),
            self.vouchers.len()
        );
    }

    fn slice_failed(&mut self, slice: DashboardSlice, err: &ClientError) {
        tracing::warn!("Failed to load {:?}: {}", slice, err);
        self.failures.push(slice);

        if err.kind() != ErrorKind::Authorization {
            return;
        }
        // Several slices refused for the same reason make one notice
        let message = err.user_message();
        if !self.feedback.notices().iter().any(|n| n.message == message) {
            self.feedback.report(err);
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn vouchers(&self) -> &[Voucher] {
        &self.vouchers
    }

    /// Slices whose last load failed
    pub fn failures(&self) -> &[DashboardSlice] {
        &self.failures
    }

    pub fn order_stats(&self) -> OrderStats {
        OrderStats::from_orders(&self.orders)
    }

    pub fn unread_notifications(&self) -> usize {
        unread_count(&self.notifications)
    }

    pub fn active_vouchers(&self, now: DateTime<Utc>) -> usize {
        self.vouchers
            .iter()
            .filter(|v| v.is_redeemable_at(now))
            .count()
    }
}
