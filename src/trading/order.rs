use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "BUY"),
            TradeSide::Sell => write!(f, "SELL"),
        }
    }
}

/// A validated manual trade instruction.
///
/// Constructed only by the controller's `Idle -> Pending` transition; raw
/// input that fails validation never becomes a request.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRequest {
    pub side: TradeSide,
    pub amount: Decimal,
    pub submitted_at: DateTime<Utc>,
}
