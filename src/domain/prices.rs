use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::market::MarketId;

/// One market price observation, the row format consumed from price feeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePoint {
    pub market: MarketId,
    pub time: DateTime<Utc>,
    /// Price per MWh-equivalent unit of energy traded in this period.
    pub price: f64,
}

/// Prices keyed by (market, timestamp).
///
/// The model formulation requires full coverage of the market set over the
/// whole time grid; gaps surface as configuration errors at build time.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    prices: HashMap<(MarketId, DateTime<Utc>), f64>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: impl IntoIterator<Item = PricePoint>) -> Self {
        let mut table = Self::new();
        for point in points {
            table.insert(point.market, point.time, point.price);
        }
        table
    }

    pub fn insert(&mut self, market: MarketId, time: DateTime<Utc>, price: f64) {
        self.prices.insert((market, time), price);
    }

    pub fn get(&self, market: &MarketId, time: DateTime<Utc>) -> Option<f64> {
        self.prices.get(&(market.clone(), time)).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> DateTime<Utc> {
        "2026-01-01T00:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_lookup() {
        let market = MarketId::from("day-ahead");
        let table = PriceTable::from_points([PricePoint {
            market: market.clone(),
            time: t0(),
            price: 42.5,
        }]);
        assert_eq!(table.get(&market, t0()), Some(42.5));
        assert_eq!(table.get(&MarketId::from("fcr"), t0()), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_last_insert_wins() {
        let market = MarketId::from("day-ahead");
        let mut table = PriceTable::new();
        table.insert(market.clone(), t0(), 10.0);
        table.insert(market.clone(), t0(), 12.0);
        assert_eq!(table.get(&market, t0()), Some(12.0));
        assert_eq!(table.len(), 1);
    }
}
