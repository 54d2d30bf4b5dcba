// src/lib.rs
// Main library module declarations

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::{ExchangeAdapter, OrderTracker, TradeHistoryCursor};
pub use config::Config;
pub use domain::{
    AdapterError, AdapterResult, Balance, Order, OrderId, OrderSide, OrderState,
    OrderStatusReport, Pair, Ticker, Trade, VenueClient, VenueError, VenueResult,
};
pub use infrastructure::RetryPolicy;
