// src/application/mod.rs
pub mod dto;
pub mod usecase;

pub use usecase::{ExchangeAdapter, OrderTracker, TradeHistoryCursor};
