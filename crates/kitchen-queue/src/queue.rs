//! Selection of the orders that belong on the live queue display.

use crate::clock::Clock;
use crate::model::{KitchenStatus, Order};
use chrono::{DateTime, Utc};

/// Orders to show at `now`: created since `clock`'s local midnight, not yet
/// delivered, ascending by order number.
///
/// Always returns a freshly built list; ties on order number keep their input
/// order.
pub fn visible_orders(orders: &[Order], now: DateTime<Utc>, clock: &dyn Clock) -> Vec<Order> {
    let today = clock.start_of_day(now);
    let mut visible: Vec<Order> = orders
        .iter()
        .filter(|order| today.map_or(true, |start| order.created_at >= start))
        .filter(|order| order.kitchen_status != KitchenStatus::Delivered)
        .cloned()
        .collect();
    visible.sort_by_key(|order| order.order_number);
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::test_zone::{local, CentralEuropeClock};
    use crate::clock::ManualClock;
    use crate::model::OrderId;
    use chrono::{Duration, FixedOffset, TimeZone};

    // 00:30 local, 21:30 UTC the previous day.
    fn just_after_midnight() -> ManualClock {
        let offset = FixedOffset::east_opt(3 * 3600).unwrap();
        ManualClock::new(offset.with_ymd_and_hms(2024, 5, 2, 0, 30, 0).unwrap())
    }

    fn order(n: u32, created_at: DateTime<Utc>, status: KitchenStatus) -> Order {
        let mut order = Order::new(OrderId(n), n, created_at);
        order.kitchen_status = status;
        order
    }

    #[test]
    fn keeps_todays_undelivered_orders_sorted() {
        let clock = just_after_midnight();
        let now = clock.now_utc();
        let orders = vec![
            order(7, now - Duration::minutes(5), KitchenStatus::Ready),
            order(3, now - Duration::minutes(20), KitchenStatus::New),
            // 23:50 local yesterday, still "today" in UTC
            order(1, now - Duration::minutes(40), KitchenStatus::New),
            order(5, now - Duration::minutes(10), KitchenStatus::Delivered),
            order(4, now - Duration::minutes(29), KitchenStatus::InProgress),
        ];

        let numbers: Vec<u32> = visible_orders(&orders, now, &clock)
            .iter()
            .map(|o| o.order_number)
            .collect();
        assert_eq!(numbers, vec![3, 4, 7]);
    }

    #[test]
    fn order_created_exactly_at_midnight_is_kept() {
        let clock = just_after_midnight();
        let now = clock.now_utc();
        let midnight = clock.start_of_day(now).unwrap();
        let orders = vec![order(1, midnight, KitchenStatus::New)];
        assert_eq!(visible_orders(&orders, now, &clock).len(), 1);
    }

    #[test]
    fn day_boundary_comes_from_the_clock_zone() {
        // 10:00 CET on the autumn change day; midnight was 00:00 CEST.
        let clock = CentralEuropeClock::at(local(10, 27, 10, 0));
        let now = clock.now_utc();
        let orders = vec![
            order(1, local(10, 27, 0, 30), KitchenStatus::New),
            order(2, local(10, 26, 23, 30), KitchenStatus::New),
        ];
        let numbers: Vec<u32> = visible_orders(&orders, now, &clock)
            .iter()
            .map(|o| o.order_number)
            .collect();
        assert_eq!(numbers, vec![1]);

        // Spring: 23:30 CET yesterday is not today even though now is +02:00.
        let clock = CentralEuropeClock::at(local(3, 31, 10, 0));
        let orders = vec![order(1, local(3, 30, 23, 30), KitchenStatus::New)];
        assert!(visible_orders(&orders, clock.now_utc(), &clock).is_empty());
    }

    #[test]
    fn repeated_calls_give_equal_results() {
        let clock = just_after_midnight();
        let now = clock.now_utc();
        let orders = vec![
            order(2, now, KitchenStatus::New),
            order(1, now, KitchenStatus::Ready),
        ];
        let first = visible_orders(&orders, now, &clock);
        let second = visible_orders(&orders, now, &clock);
        assert_eq!(first, second);
        assert_eq!(first[0].order_number, 1);
    }
}
