// src/application/usecase/order_tracker.rs
// Order lifecycle state machine

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::domain::model::{Order, OrderId, OrderState};

/// Tracks every submitted order from placement to a terminal state.
///
/// Transitions are driven exclusively by order-status and cancellation
/// results; the tracker never infers fill state from market data. `Filled`
/// and `Cancelled` absorb all later events. `Unknown` records a failed
/// status check and is left again by the next successful check.
#[derive(Debug, Default)]
pub struct OrderTracker {
    orders: HashMap<OrderId, Order>,
}

impl OrderTracker {
    pub fn new() -> Self {
        Self {
            orders: HashMap::new(),
        }
    }

    /// Take ownership of an order whose submission the venue acknowledged.
    pub fn track(&mut self, order: Order) {
        log::debug!("tracking order {} ({})", order.id, order.side);
        self.orders.insert(order.id.clone(), order);
    }

    /// Apply a successful status check: remaining quantity above zero means
    /// the order is live, zero means it filled.
    pub fn record_check(&mut self, id: &OrderId, remaining: Decimal) {
        self.transition(
            id,
            if remaining > Decimal::ZERO {
                OrderState::Live
            } else {
                OrderState::Filled
            },
        );
    }

    /// Apply a failed status check. The order's state is indeterminate; it
    /// must not be presumed live or terminal.
    pub fn record_check_failure(&mut self, id: &OrderId) {
        self.transition(id, OrderState::Unknown);
    }

    /// Apply an acknowledged cancellation.
    pub fn record_cancelled(&mut self, id: &OrderId) {
        self.transition(id, OrderState::Cancelled);
    }

    pub fn state(&self, id: &OrderId) -> Option<OrderState> {
        self.orders.get(id).map(|order| order.state)
    }

    /// Orders that have not reached a terminal state.
    pub fn open_orders(&self) -> Vec<&Order> {
        self.orders
            .values()
            .filter(|order| !order.state.is_terminal())
            .collect()
    }

    fn transition(&mut self, id: &OrderId, next: OrderState) {
        let Some(order) = self.orders.get_mut(id) else {
            log::debug!("ignoring event for untracked order {}", id);
            return;
        };

        if order.state.is_terminal() {
            log::debug!(
                "order {} already {:?}, ignoring transition to {:?}",
                id,
                order.state,
                next
            );
            return;
        }

        log::debug!("order {} {:?} -> {:?}", id, order.state, next);
        order.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::OrderSide;
    use rust_decimal_macros::dec;

    fn pending(id: &str) -> Order {
        Order {
            id: OrderId(id.to_string()),
            side: OrderSide::Buy,
            requested_amount: dec!(0.5),
            requested_price: dec!(0.05),
            state: OrderState::Pending,
        }
    }

    #[test]
    fn check_with_remaining_moves_pending_to_live() {
        let mut tracker = OrderTracker::new();
        let id = OrderId("a".to_string());
        tracker.track(pending("a"));

        tracker.record_check(&id, dec!(0.3));
        assert_eq!(tracker.state(&id), Some(OrderState::Live));
    }

    #[test]
    fn check_with_zero_remaining_fills() {
        let mut tracker = OrderTracker::new();
        let id = OrderId("a".to_string());
        tracker.track(pending("a"));

        tracker.record_check(&id, dec!(0.3));
        tracker.record_check(&id, Decimal::ZERO);
        assert_eq!(tracker.state(&id), Some(OrderState::Filled));
    }

    #[test]
    fn failed_check_yields_unknown_and_recovers() {
        let mut tracker = OrderTracker::new();
        let id = OrderId("a".to_string());
        tracker.track(pending("a"));

        tracker.record_check_failure(&id);
        assert_eq!(tracker.state(&id), Some(OrderState::Unknown));

        // Unknown is not terminal; a later successful check resolves it
        tracker.record_check(&id, dec!(0.1));
        assert_eq!(tracker.state(&id), Some(OrderState::Live));

        tracker.record_check_failure(&id);
        tracker.record_check(&id, Decimal::ZERO);
        assert_eq!(tracker.state(&id), Some(OrderState::Filled));
    }

    #[test]
    fn cancellation_is_terminal() {
        let mut tracker = OrderTracker::new();
        let id = OrderId("a".to_string());
        tracker.track(pending("a"));

        tracker.record_cancelled(&id);
        assert_eq!(tracker.state(&id), Some(OrderState::Cancelled));

        // Late status results no longer move the order
        tracker.record_check(&id, dec!(0.2));
        assert_eq!(tracker.state(&id), Some(OrderState::Cancelled));
        tracker.record_check_failure(&id);
        assert_eq!(tracker.state(&id), Some(OrderState::Cancelled));
    }

    #[test]
    fn filled_absorbs_cancellation() {
        let mut tracker = OrderTracker::new();
        let id = OrderId("a".to_string());
        tracker.track(pending("a"));

        tracker.record_check(&id, Decimal::ZERO);
        tracker.record_cancelled(&id);
        assert_eq!(tracker.state(&id), Some(OrderState::Filled));
    }

    #[test]
    fn untracked_orders_are_ignored() {
        let mut tracker = OrderTracker::new();
        let id = OrderId("ghost".to_string());

        tracker.record_check(&id, dec!(1));
        assert_eq!(tracker.state(&id), None);
    }

    #[test]
    fn open_orders_excludes_terminal() {
        let mut tracker = OrderTracker::new();
        tracker.track(pending("a"));
        tracker.track(pending("b"));
        tracker.track(pending("c"));

        tracker.record_check(&OrderId("a".to_string()), Decimal::ZERO);
        tracker.record_cancelled(&OrderId("b".to_string()));

        let open = tracker.open_orders();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, OrderId("c".to_string()));
    }
}
