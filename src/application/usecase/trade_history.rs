// src/application/usecase/trade_history.rs
// Incremental, gap-free trade history

use crate::domain::model::Trade;

/// Bookmark over a venue's trade history for one pair.
///
/// Whatever order the venue returns pages in, `apply` delivers a strictly
/// ascending `(timestamp, id)` sequence of trades not seen before, and
/// advances the bookmark only once that batch exists. The cursor never
/// regresses, so a page that contains nothing new yields an empty batch
/// rather than redelivery or an error.
#[derive(Debug, Default)]
pub struct TradeHistoryCursor {
    last_seen_id: Option<u64>,
    last_seen_timestamp: Option<i64>,
}

impl TradeHistoryCursor {
    /// A fresh cursor: the first page is delivered in full.
    pub fn new() -> Self {
        Self::default()
    }

    /// A cursor seeded with a timestamp: only trades strictly after it are
    /// delivered. Ids are unknown until the first delivery, so the seed
    /// filters on timestamp alone.
    pub fn since(timestamp: i64) -> Self {
        Self {
            last_seen_id: None,
            last_seen_timestamp: Some(timestamp),
        }
    }

    pub fn last_seen_timestamp(&self) -> Option<i64> {
        self.last_seen_timestamp
    }

    pub fn last_seen_id(&self) -> Option<u64> {
        self.last_seen_id
    }

    /// Normalize a fetched page and advance the cursor.
    ///
    /// `descending` marks pages the venue orders newest-first; they are
    /// reversed before the ascending sort so the delivery contract holds
    /// regardless of the venue's native ordering.
    pub fn apply(&mut self, page: Vec<Trade>, descending: bool) -> Vec<Trade> {
        let mut trades = page;
        if descending {
            trades.reverse();
        }
        trades.sort_by_key(Trade::sort_key);

        let fresh: Vec<Trade> = trades
            .into_iter()
            .filter(|trade| self.is_unseen(trade))
            .collect();

        if let Some(last) = fresh.last() {
            self.last_seen_timestamp = Some(last.timestamp);
            self.last_seen_id = Some(last.id);
        }

        fresh
    }

    fn is_unseen(&self, trade: &Trade) -> bool {
        match (self.last_seen_timestamp, self.last_seen_id) {
            (None, _) => true,
            (Some(ts), None) => trade.timestamp > ts,
            (Some(ts), Some(id)) => trade.sort_key() > (ts, id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn trade(id: u64, timestamp: i64) -> Trade {
        Trade {
            id,
            timestamp,
            price: dec!(1),
            amount: dec!(1),
        }
    }

    #[test]
    fn descending_page_is_delivered_ascending() {
        let mut cursor = TradeHistoryCursor::new();

        // Venue-native ordering: most recent first
        let delivered = cursor.apply(vec![trade(3, 120), trade(2, 110), trade(1, 100)], true);

        let ids: Vec<u64> = delivered.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(cursor.last_seen_timestamp(), Some(120));
        assert_eq!(cursor.last_seen_id(), Some(3));
    }

    #[test]
    fn ascending_contract_holds_for_unsorted_input() {
        let mut cursor = TradeHistoryCursor::new();

        let delivered = cursor.apply(
            vec![trade(2, 110), trade(4, 110), trade(1, 100), trade(3, 110)],
            false,
        );

        let keys: Vec<(i64, u64)> = delivered.iter().map(Trade::sort_key).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        // Ties on timestamp break by id ascending
        assert_eq!(keys, vec![(100, 1), (110, 2), (110, 3), (110, 4)]);
    }

    #[test]
    fn seeded_cursor_filters_strictly_after_since() {
        let mut cursor = TradeHistoryCursor::since(110);

        let delivered = cursor.apply(vec![trade(3, 120), trade(2, 110), trade(1, 100)], true);

        let ids: Vec<u64> = delivered.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn reapplying_a_seen_page_is_empty_not_an_error() {
        let mut cursor = TradeHistoryCursor::new();
        let page = vec![trade(3, 120), trade(2, 110), trade(1, 100)];

        assert_eq!(cursor.apply(page.clone(), true).len(), 3);
        assert!(cursor.apply(page, true).is_empty());
        assert_eq!(cursor.last_seen_timestamp(), Some(120));
    }

    #[test]
    fn empty_page_is_valid_and_does_not_move_the_cursor() {
        let mut cursor = TradeHistoryCursor::since(500);

        assert!(cursor.apply(Vec::new(), true).is_empty());
        assert_eq!(cursor.last_seen_timestamp(), Some(500));
        assert_eq!(cursor.last_seen_id(), None);
    }

    #[test]
    fn cursor_never_regresses() {
        let mut cursor = TradeHistoryCursor::new();
        cursor.apply(vec![trade(1, 100), trade(2, 110)], false);
        assert_eq!(cursor.last_seen_timestamp(), Some(110));

        // A stale page full of already-seen trades leaves the cursor alone
        cursor.apply(vec![trade(1, 100)], false);
        assert_eq!(cursor.last_seen_timestamp(), Some(110));
        assert_eq!(cursor.last_seen_id(), Some(2));

        // New trades move it forward only
        cursor.apply(vec![trade(5, 130), trade(1, 100)], false);
        assert_eq!(cursor.last_seen_timestamp(), Some(130));
        assert_eq!(cursor.last_seen_id(), Some(5));
    }

    #[test]
    fn same_timestamp_new_id_is_delivered_once() {
        let mut cursor = TradeHistoryCursor::new();
        cursor.apply(vec![trade(1, 100)], false);

        // A later trade sharing the timestamp is new; the seen one is not
        let delivered = cursor.apply(vec![trade(2, 100), trade(1, 100)], true);
        let ids: Vec<u64> = delivered.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2]);

        assert!(cursor.apply(vec![trade(2, 100)], false).is_empty());
    }
}
