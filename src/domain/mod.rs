// src/domain/mod.rs
pub mod errors;
pub mod model;
pub mod repository;

// Re-export common types for convenience
pub use errors::{AdapterError, AdapterResult, VenueError, VenueResult};
pub use model::{
    Balance, Order, OrderId, OrderSide, OrderState, Pair, Ticker, Trade, truncate_amount,
};
pub use repository::{OrderStatusReport, VenueClient};
