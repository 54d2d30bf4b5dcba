// src/infrastructure/mod.rs
pub mod retry;

pub use retry::RetryPolicy;
