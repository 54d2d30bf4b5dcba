// src/application/dto/parser.rs
// Parsers for raw venue payloads

use chrono::{DateTime, NaiveDateTime};

use super::VenueTrade;
use crate::domain::errors::{VenueError, VenueResult};
use crate::domain::model::Trade;

/// Parse a venue timestamp into UTC epoch seconds.
///
/// The venue sends naive ISO-8601 strings that are UTC by convention
/// (`2016-04-12T02:34:56.123`); some endpoints append an explicit offset.
pub fn parse_venue_timestamp(raw: &str) -> VenueResult<i64> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc().timestamp());
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.timestamp())
        .map_err(|e| VenueError::Malformed(format!("invalid timestamp {:?}: {}", raw, e)))
}

impl VenueTrade {
    /// Normalize a raw venue record into a domain trade.
    pub fn into_trade(self) -> VenueResult<Trade> {
        let timestamp = parse_venue_timestamp(&self.timestamp)?;

        Ok(Trade {
            id: self.id,
            timestamp,
            price: self.price,
            amount: self.quantity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_naive_timestamp_as_utc() {
        // 2016-04-12T02:34:56 UTC
        assert_eq!(
            parse_venue_timestamp("2016-04-12T02:34:56.123").unwrap(),
            1460428496
        );
        assert_eq!(
            parse_venue_timestamp("2016-04-12T02:34:56").unwrap(),
            1460428496
        );
    }

    #[test]
    fn parses_offset_timestamp() {
        assert_eq!(
            parse_venue_timestamp("2016-04-12T02:34:56+00:00").unwrap(),
            1460428496
        );
    }

    #[test]
    fn rejects_garbage_timestamp() {
        assert!(matches!(
            parse_venue_timestamp("yesterday"),
            Err(VenueError::Malformed(_))
        ));
    }

    #[test]
    fn raw_trade_normalizes_to_domain() {
        let raw: VenueTrade = serde_json::from_str(
            r#"{"Id":319435,"TimeStamp":"2016-04-12T02:34:56.123","Price":"0.012634","Quantity":"0.30802438"}"#,
        )
        .unwrap();
        let trade = raw.into_trade().unwrap();
        assert_eq!(trade.id, 319435);
        assert_eq!(trade.timestamp, 1460428496);
        assert_eq!(trade.price, dec!(0.012634));
        assert_eq!(trade.amount, dec!(0.30802438));
    }
}
