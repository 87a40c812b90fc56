//! Dashboard loading tests

mod common;

use chrono::Utc;
use common::*;
use marketplace_client::controllers::{
    DashboardController, DashboardSlice, Navigation, NoticeLevel,
};
use rust_decimal::Decimal;
use shared::*;

fn script() -> Script {
    Script {
        orders: vec![
            order(1, 100, OrderStatus::Completed),
            order(2, 250, OrderStatus::Completed),
            order(3, 40, OrderStatus::Pending),
            order(4, 60, OrderStatus::Processing),
            order(5, 80, OrderStatus::Cancelled),
        ],
        notifications: vec![
            notification(1, false),
            notification(2, true),
            notification(3, false),
        ],
        vouchers: vec![voucher(1, true), voucher(2, false), voucher(3, true)],
        ..Default::default()
    }
}

#[tokio::test]
async fn test_dashboard_loads_all_slices() {
    let mut dashboard = DashboardController::new(RecordingApi::new(script()));

    dashboard.load().await;

    assert!(dashboard.failures().is_empty());
    assert_eq!(dashboard.orders().len(), 5);
    assert_eq!(dashboard.unread_notifications(), 2);
    assert_eq!(dashboard.active_vouchers(Utc::now()), 2);

    let stats = dashboard.order_stats();
    assert_eq!(stats.total_orders, 5);
    assert_eq!(stats.count(OrderStatus::Completed), 2);
    assert_eq!(stats.revenue, Decimal::from(350));
    assert_eq!(stats.outstanding, Decimal::from(100));
    assert_eq!(stats.amount(OrderStatus::Cancelled), Decimal::from(80));

    let calls = dashboard.api().calls();
    assert_eq!(calls.len(), 3);
    assert!(calls.contains(&Call::ListOrders));
    assert!(calls.contains(&Call::ListNotifications));
    assert!(calls.contains(&Call::ListVouchers));
}

#[tokio::test]
async fn test_failed_slice_does_not_hide_others() {
    let mut dashboard = DashboardController::new(RecordingApi::new(Script {
        fail_orders: true,
        ..script()
    }));

    dashboard.load().await;

    assert_eq!(dashboard.failures(), &[DashboardSlice::Orders]);
    assert!(dashboard.orders().is_empty());
    assert_eq!(dashboard.order_stats().total_orders, 0);
    assert_eq!(dashboard.notifications().len(), 3);
    assert_eq!(dashboard.vouchers().len(), 3);
}

#[tokio::test]
async fn test_reload_clears_previous_failures() {
    let api = RecordingApi::new(Script {
        fail_orders: true,
        ..script()
    });
    let mut dashboard = DashboardController::new(api.clone());
    dashboard.load().await;
    assert_eq!(dashboard.failures().len(), 1);

    api.script(|s| s.fail_orders = false);
    dashboard.load().await;

    assert!(dashboard.failures().is_empty());
    assert_eq!(dashboard.orders().len(), 5);
}

#[tokio::test]
async fn test_expired_session_redirects_to_login() {
    let mut dashboard = DashboardController::new(RecordingApi::new(Script {
        orders_error: Some(401),
        notifications_error: Some(401),
        ..script()
    }));

    dashboard.load().await;

    assert_eq!(
        dashboard.failures(),
        &[DashboardSlice::Orders, DashboardSlice::Notifications]
    );
    assert_eq!(dashboard.feedback().navigation(), Some(&Navigation::Login));
    // Both refusals collapse into one notice
    assert_eq!(dashboard.feedback().notices().len(), 1);
    assert_eq!(dashboard.vouchers().len(), 3);
}

#[tokio::test]
async fn test_forbidden_slice_is_reported() {
    let mut dashboard = DashboardController::new(RecordingApi::new(Script {
        orders_error: Some(403),
        ..script()
    }));

    dashboard.load().await;

    assert!(dashboard.feedback().navigation().is_none());
    let notices = dashboard.feedback_mut().take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
}

#[tokio::test]
async fn test_server_failure_does_not_prompt_sign_in() {
    let mut dashboard = DashboardController::new(RecordingApi::new(Script {
        fail_orders: true,
        ..script()
    }));

    dashboard.load().await;

    assert!(dashboard.feedback().navigation().is_none());
    assert!(dashboard.feedback().notices().is_empty());
}
