// src/application/usecase/exchange_adapter.rs
// The normalizing venue façade

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::Mutex;

use crate::application::usecase::{OrderTracker, TradeHistoryCursor};
use crate::domain::errors::{AdapterError, AdapterResult};
use crate::domain::model::{
    truncate_amount, Balance, Order, OrderId, OrderSide, OrderState, Pair, Ticker, Trade,
};
use crate::domain::repository::VenueClient;
use crate::infrastructure::retry::RetryPolicy;

/// Uniform, retry-aware interface over one venue and one trading pair.
///
/// Per-operation failure policy follows the economics of each call:
/// point-in-time queries (portfolio, ticker) and order submission fail
/// fast, cancellation is best-effort, and only trade history retries
/// automatically, because it is idempotent to refetch. The tracker and
/// cursor behind the mutexes are the only state that survives across
/// calls.
pub struct ExchangeAdapter {
    client: Arc<dyn VenueClient>,
    pair: Pair,
    maker_fee: Decimal,
    history_retry: RetryPolicy,
    tracker: Mutex<OrderTracker>,
    cursor: Mutex<TradeHistoryCursor>,
}

impl ExchangeAdapter {
    pub fn new(
        client: Arc<dyn VenueClient>,
        pair: Pair,
        maker_fee: Decimal,
        history_retry: RetryPolicy,
    ) -> Self {
        Self {
            client,
            pair,
            maker_fee,
            history_retry,
            tracker: Mutex::new(OrderTracker::new()),
            cursor: Mutex::new(TradeHistoryCursor::new()),
        }
    }

    pub fn pair(&self) -> &Pair {
        &self.pair
    }

    /// Snapshot of all account balances. Not retried: the snapshot is
    /// point-in-time, so a failure is surfaced instead of silently
    /// delaying the caller with stale data.
    pub async fn portfolio(&self) -> AdapterResult<Vec<Balance>> {
        match self.client.balances().await {
            Ok(balances) => Ok(balances),
            Err(e) => {
                log::error!("unable to get balances ({})", e);
                Err(e.into())
            }
        }
    }

    /// Current best bid/ask for the adapter's pair.
    pub async fn ticker(&self) -> AdapterResult<Ticker> {
        match self.client.ticker(&self.pair).await {
            Ok(ticker) => Ok(ticker),
            Err(e) => {
                log::error!("unable to get ticker for {} ({})", self.pair, e);
                Err(e.into())
            }
        }
    }

    /// The maker fee fraction for the account tier. Limit orders resting
    /// on the book pay this; the value is configured, not fetched.
    pub fn fee(&self) -> Decimal {
        self.maker_fee
    }

    /// Place a limit order. The amount is truncated toward zero to the
    /// venue's minimum increment before submission. Rejections are not
    /// retried here: resubmitting a rejected order risks duplicate
    /// exposure, so that decision stays with the caller.
    pub async fn submit_order(
        &self,
        side: OrderSide,
        amount: Decimal,
        price: Decimal,
    ) -> AdapterResult<OrderId> {
        let amount = truncate_amount(amount);

        let placed = match side {
            OrderSide::Buy => self.client.buy_limit(&self.pair, amount, price).await,
            OrderSide::Sell => self.client.sell_limit(&self.pair, amount, price).await,
        };

        match placed {
            Ok(id) => {
                log::info!("{} order {} placed: {} @ {}", side, id, amount, price);
                self.tracker.lock().await.track(Order {
                    id: id.clone(),
                    side,
                    requested_amount: amount,
                    requested_price: price,
                    state: OrderState::Pending,
                });
                Ok(id)
            }
            Err(e) => {
                log::error!("unable to {} {} ({})", side, self.pair, e);
                Err(e.into())
            }
        }
    }

    /// Request cancellation. Best-effort: the order may already have
    /// filled, so a venue failure is logged and swallowed rather than
    /// propagated.
    pub async fn cancel_order(&self, id: &OrderId) -> AdapterResult<()> {
        match self.client.cancel_order(id).await {
            Ok(()) => self.tracker.lock().await.record_cancelled(id),
            Err(e) => log::warn!("unable to cancel order {} ({})", id, e),
        }
        Ok(())
    }

    /// Whether the venue still reports remaining quantity for the order.
    ///
    /// A venue failure fails the call outright and marks the tracked order
    /// `Unknown`; it is never defaulted to live or filled.
    pub async fn check_order(&self, id: &OrderId) -> AdapterResult<bool> {
        match self.client.order_status(id).await {
            Ok(report) => {
                self.tracker.lock().await.record_check(id, report.remaining);
                Ok(report.remaining > Decimal::ZERO)
            }
            Err(e) => {
                log::error!("unable to check order {} ({})", id, e);
                self.tracker.lock().await.record_check_failure(id);
                Err(AdapterError::OrderStateUnknown(id.clone()))
            }
        }
    }

    /// Tracked lifecycle state of a submitted order.
    pub async fn order_state(&self, id: &OrderId) -> Option<OrderState> {
        self.tracker.lock().await.state(id)
    }

    /// Submitted orders that have not reached a terminal state.
    pub async fn open_orders(&self) -> Vec<Order> {
        self.tracker
            .lock()
            .await
            .open_orders()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Fetch trades not yet delivered, oldest first.
    ///
    /// `since` seeds a fresh cursor; once the cursor has state it governs
    /// and `since` is ignored. `descending` marks venues whose pages come
    /// newest-first. Venue failures are retried transparently under the
    /// configured policy, so the caller only ever sees a (possibly
    /// delayed) success, unless the policy's attempt cap is exhausted.
    /// The cursor lock is held across the round-trip, so same-pair
    /// fetches apply strictly sequentially.
    pub async fn trade_history(
        &self,
        since: Option<i64>,
        descending: bool,
    ) -> AdapterResult<Vec<Trade>> {
        let mut cursor = self.cursor.lock().await;

        if cursor.last_seen_timestamp().is_none() {
            if let Some(timestamp) = since {
                *cursor = TradeHistoryCursor::since(timestamp);
            }
        }

        let page = self
            .history_retry
            .run("trade history", || self.client.market_history(&self.pair))
            .await?;

        Ok(cursor.apply(page, descending))
    }
}
