use chrono::{DateTime, Duration, Utc};
use crate::domain::models::{
    dashboard::DashboardStats,
    order::{Order, OrderStatus},
    product::Product,
    user::User,
};

pub const GROWTH_WINDOW_DAYS: i64 = 30;

/// Aggregates the headline numbers of the dashboard.
///
/// Revenue only counts orders that were not cancelled. Growth compares the
/// last `GROWTH_WINDOW_DAYS` with the window before it.
pub fn compute_stats(users: &[User], products: &[Product], orders: &[Order], now: DateTime<Utc>) -> DashboardStats {
    let window = Duration::days(GROWTH_WINDOW_DAYS);
    let recent_start = now - window;
    let previous_start = recent_start - window;

    let in_recent = |t: &DateTime<Utc>| *t > recent_start && *t <= now;
    let in_previous = |t: &DateTime<Utc>| *t > previous_start && *t <= recent_start;

    let billable: Vec<&Order> = orders.iter().filter(|o| o.status != OrderStatus::Cancelled).collect();
    let revenue_in = |pred: &dyn Fn(&DateTime<Utc>) -> bool| -> f64 {
        billable.iter().filter(|o| pred(&o.created_at)).map(|o| o.total).sum()
    };

    let total_revenue: f64 = billable.iter().map(|o| o.total).sum();

    DashboardStats {
        total_users: users.len() as i64,
        total_products: products.len() as i64,
        total_orders: orders.len() as i64,
        total_revenue: round_to(total_revenue, 2),
        user_growth: growth(
            users.iter().filter(|u| in_recent(&u.created_at)).count() as f64,
            users.iter().filter(|u| in_previous(&u.created_at)).count() as f64,
        ),
        revenue_growth: growth(revenue_in(&in_recent), revenue_in(&in_previous)),
        order_growth: growth(
            orders.iter().filter(|o| in_recent(&o.created_at)).count() as f64,
            orders.iter().filter(|o| in_previous(&o.created_at)).count() as f64,
        ),
    }
}

/// Percent change from `previous` to `current`, one decimal.
pub fn growth(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return if current > 0.0 { 100.0 } else { 0.0 };
    }
    round_to((current - previous) / previous * 100.0, 1)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
