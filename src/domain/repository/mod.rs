// src/domain/repository/mod.rs
// Venue boundary interface

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::errors::VenueResult;
use crate::domain::model::{Balance, OrderId, Pair, Ticker, Trade};

/// Venue-reported status of a single order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderStatusReport {
    /// Quantity not yet filled. Zero means the order is done.
    pub remaining: Decimal,
}

/// Authenticated interface to the remote venue.
///
/// Implementations own transport and signing, and are responsible for
/// collapsing the venue's success-flag quirks into `VenueError` at this
/// boundary (see `application::dto::VenueResponse`). Every call returns a
/// single normalized `Result`; no method reports success and failure at
/// the same time.
#[async_trait]
pub trait VenueClient: Send + Sync {
    /// Query all non-zero account balances.
    async fn balances(&self) -> VenueResult<Vec<Balance>>;

    /// Query the current best bid/ask for a pair.
    async fn ticker(&self, pair: &Pair) -> VenueResult<Ticker>;

    /// Place a limit buy order, returning the venue-assigned id.
    async fn buy_limit(&self, pair: &Pair, amount: Decimal, price: Decimal)
        -> VenueResult<OrderId>;

    /// Place a limit sell order, returning the venue-assigned id.
    async fn sell_limit(&self, pair: &Pair, amount: Decimal, price: Decimal)
        -> VenueResult<OrderId>;

    /// Request cancellation of an order.
    async fn cancel_order(&self, id: &OrderId) -> VenueResult<()>;

    /// Query the status of an order.
    async fn order_status(&self, id: &OrderId) -> VenueResult<OrderStatusReport>;

    /// Fetch the venue's most recent trade page for a pair, in the venue's
    /// native ordering. Timestamps are already normalized to UTC epoch
    /// seconds by the implementation (`application::dto::parser`).
    async fn market_history(&self, pair: &Pair) -> VenueResult<Vec<Trade>>;
}
