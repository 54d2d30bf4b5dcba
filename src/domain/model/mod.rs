// src/domain/model/mod.rs
// Core domain models

use rust_decimal::Decimal;

/// Number of decimal places the venue accepts for order amounts.
pub const AMOUNT_SCALE: u32 = 8;

/// Truncate an order amount toward zero to the venue's minimum increment.
///
/// Truncation, never rounding: the submitted amount must not exceed the
/// caller's intended exposure.
pub fn truncate_amount(amount: Decimal) -> Decimal {
    amount.trunc_with_scale(AMOUNT_SCALE)
}

/// A quote/base asset combination traded on the venue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub currency: String,
    pub asset: String,
}

impl Pair {
    pub fn new(currency: &str, asset: &str) -> Self {
        Self {
            currency: currency.to_string(),
            asset: asset.to_string(),
        }
    }
}

impl std::fmt::Display for Pair {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        // Venue market string, quote first
        write!(f, "{}-{}", self.currency, self.asset)
    }
}

/// Available balance for a single currency
#[derive(Debug, Clone, PartialEq)]
pub struct Balance {
    pub currency: String,
    pub available: Decimal,
}

impl Balance {
    pub fn new(currency: &str, available: Decimal) -> Self {
        Self {
            currency: currency.to_string(),
            available,
        }
    }
}

/// Best bid/ask as reported by the venue. The adapter surfaces the venue's
/// numbers untouched; it does not enforce bid <= ask.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ticker {
    pub bid: Decimal,
    pub ask: Decimal,
}

/// Venue-assigned order identifier, opaque to the adapter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderId(pub String);

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "buy"),
            OrderSide::Sell => write!(f, "sell"),
        }
    }
}

/// Lifecycle state of a submitted order.
///
/// `Unknown` means a status check itself failed; it is not terminal and a
/// later successful check moves the order forward or back to `Live`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderState {
    Pending,
    Live,
    Filled,
    Cancelled,
    Unknown,
}

impl OrderState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderState::Filled | OrderState::Cancelled)
    }
}

/// A submitted order as tracked by the adapter.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub side: OrderSide,
    pub requested_amount: Decimal,
    pub requested_price: Decimal,
    pub state: OrderState,
}

/// A single executed trade on the venue, immutable once fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    /// Venue-assigned identifier, unique within a trading pair.
    pub id: u64,
    /// UTC epoch seconds.
    pub timestamp: i64,
    pub price: Decimal,
    pub amount: Decimal,
}

impl Trade {
    /// Sort key for the ascending delivery contract.
    pub fn sort_key(&self) -> (i64, u64) {
        (self.timestamp, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn truncation_never_rounds_up() {
        assert_eq!(truncate_amount(dec!(0.123456789)), dec!(0.12345678));
        assert_eq!(truncate_amount(dec!(0.999999999)), dec!(0.99999999));
        assert_eq!(truncate_amount(dec!(1)), dec!(1));
    }

    #[test]
    fn truncation_is_bounded_by_one_increment() {
        let inputs = [
            dec!(0.000000001),
            dec!(0.123456789),
            dec!(42.000000015),
            dec!(3.14159265358979),
        ];
        let increment = dec!(0.00000001);
        for amount in inputs {
            let truncated = truncate_amount(amount);
            assert!(truncated <= amount);
            assert!(amount - truncated < increment);
        }
    }

    #[test]
    fn pair_formats_quote_first() {
        assert_eq!(Pair::new("BTC", "ETH").to_string(), "BTC-ETH");
    }

    #[test]
    fn terminal_states() {
        assert!(OrderState::Filled.is_terminal());
        assert!(OrderState::Cancelled.is_terminal());
        assert!(!OrderState::Pending.is_terminal());
        assert!(!OrderState::Live.is_terminal());
        assert!(!OrderState::Unknown.is_terminal());
    }
}
