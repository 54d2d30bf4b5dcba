pub mod exchange_adapter;
pub mod order_tracker;
pub mod trade_history;

// Re-export public API
pub use exchange_adapter::ExchangeAdapter;
pub use order_tracker::OrderTracker;
pub use trade_history::TradeHistoryCursor;
