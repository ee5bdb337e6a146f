use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a market the battery can bid into (e.g. "day-ahead", "fcr").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketId(String);

impl MarketId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MarketId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let market = MarketId::new("day-ahead");
        assert_eq!(market.to_string(), "day-ahead");
        assert_eq!(market.as_str(), "day-ahead");
    }

    #[test]
    fn test_serde_transparent() {
        let market = MarketId::from("fcr");
        let json = serde_json::to_string(&market).unwrap();
        assert_eq!(json, "\"fcr\"");
        let back: MarketId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, market);
    }
}
