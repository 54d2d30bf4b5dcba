// src/application/dto/mod.rs
// Raw venue payload models
//
// The venue wraps every reply in a `{success, message, result}` envelope,
// with inconsistent casing inside `result` and success flags that are
// sometimes absent. Everything quirky about that contract is collapsed
// here, at one boundary; the rest of the crate only sees domain types and
// `VenueError`.

pub mod parser;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::errors::{VenueError, VenueResult};
use crate::domain::model::{Balance, OrderId, Ticker};
use crate::domain::repository::OrderStatusReport;

/// The venue's reply envelope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VenueResponse<T> {
    pub success: Option<bool>,
    pub message: Option<String>,
    pub result: Option<T>,
}

impl<T> VenueResponse<T> {
    /// Collapse the envelope into a normalized result.
    ///
    /// A missing success flag is treated the same as `success: false`. The
    /// decision is made on this payload alone, never on a transport-level
    /// error object carried alongside it.
    pub fn into_result(self) -> VenueResult<T> {
        match self.success {
            Some(true) => self.result.ok_or_else(|| {
                VenueError::Malformed("success reported without a result payload".to_string())
            }),
            _ => Err(VenueError::Rejected(
                self.message
                    .unwrap_or_else(|| "venue reported failure without a message".to_string()),
            )),
        }
    }

    /// Collapse an envelope whose result payload is irrelevant, such as a
    /// cancellation acknowledgment (the venue sends `result: null` there).
    pub fn into_ack(self) -> VenueResult<()> {
        match self.success {
            Some(true) => Ok(()),
            _ => Err(VenueError::Rejected(
                self.message
                    .unwrap_or_else(|| "venue reported failure without a message".to_string()),
            )),
        }
    }
}

/// One balance entry as the venue reports it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VenueBalance {
    #[serde(rename = "Currency")]
    pub currency: String,
    #[serde(rename = "Available")]
    pub available: Decimal,
}

impl From<VenueBalance> for Balance {
    fn from(raw: VenueBalance) -> Self {
        Balance {
            currency: raw.currency,
            available: raw.available,
        }
    }
}

/// Ticker payload as the venue reports it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VenueTicker {
    #[serde(rename = "Bid")]
    pub bid: Decimal,
    #[serde(rename = "Ask")]
    pub ask: Decimal,
}

impl From<VenueTicker> for Ticker {
    fn from(raw: VenueTicker) -> Self {
        Ticker {
            bid: raw.bid,
            ask: raw.ask,
        }
    }
}

/// Acknowledgment of a placed or cancelled order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VenueOrderAck {
    pub uuid: String,
}

impl From<VenueOrderAck> for OrderId {
    fn from(raw: VenueOrderAck) -> Self {
        OrderId(raw.uuid)
    }
}

/// Order status payload as the venue reports it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VenueOrderStatus {
    #[serde(rename = "QuantityRemaining")]
    pub quantity_remaining: Decimal,
}

impl From<VenueOrderStatus> for OrderStatusReport {
    fn from(raw: VenueOrderStatus) -> Self {
        OrderStatusReport {
            remaining: raw.quantity_remaining,
        }
    }
}

/// One market-history entry as the venue reports it. The timestamp is a
/// naive ISO-8601 string in UTC; `into_trade` normalizes it to epoch
/// seconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VenueTrade {
    #[serde(rename = "Id")]
    pub id: u64,
    #[serde(rename = "TimeStamp")]
    pub timestamp: String,
    #[serde(rename = "Price")]
    pub price: Decimal,
    #[serde(rename = "Quantity")]
    pub quantity: Decimal,
}
