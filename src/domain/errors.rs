// src/domain/errors.rs
use thiserror::Error;

use crate::domain::model::OrderId;

/// Failures at the venue boundary.
///
/// Every `VenueClient` call collapses the venue's success-flag quirks into
/// this one type: a missing or false success flag is a rejection, transport
/// problems are transport, and anything that fits neither contract is
/// malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VenueError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("venue rejected the request: {0}")]
    Rejected(String),

    #[error("malformed venue payload: {0}")]
    Malformed(String),
}

/// Failures surfaced to the adapter's callers.
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("venue error: {0}")]
    Venue(#[from] VenueError),

    /// A status check failed outright; the order's state is indeterminate
    /// and must not be treated as live or terminal.
    #[error("state of order {0} is unknown")]
    OrderStateUnknown(OrderId),

    #[error("configuration error: {0}")]
    Config(String),
}

// Result type alias for convenience
pub type VenueResult<T> = Result<T, VenueError>;
pub type AdapterResult<T> = Result<T, AdapterError>;
