//! Wire model for the bot's status and trade endpoints.
//!
//! The status payload frequently arrives partial: a freshly started bot has
//! no portfolio yet, a halted one stops producing series. Every optional
//! field falls back to a defined default so a thin payload normalizes into a
//! complete snapshot instead of failing the poll.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::trading::order::TradeSide;

/// One full status snapshot. Replaces the previous snapshot wholesale on
/// every poll; snapshots are never merged field-by-field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotStatus {
    #[serde(default)]
    pub active: bool,
    pub portfolio: Option<Portfolio>,
    pub performance: Option<Performance>,
    #[serde(default)]
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub price_series: Vec<PricePoint>,
    #[serde(default)]
    pub volume_series: Vec<VolumePoint>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub total_value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    pub daily_change: Decimal,
}

/// An alert as emitted by the bot. Immutable once received; `time` is a
/// display string, not a parseable timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Alert {
    pub time: String,
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: AlertKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    #[default]
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PricePoint {
    pub timestamp: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VolumePoint {
    pub timestamp: String,
    pub value: Decimal,
}

/// Body of a manual trade submission.
#[derive(Debug, Clone, Serialize)]
pub struct TradeOrder {
    pub side: TradeSide,
    pub amount: Decimal,
}

/// The trade endpoint's answer. Anything other than `"success"` is a
/// rejection; `reason` is optional and backend-worded.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeReceipt {
    pub status: String,
    #[serde(default)]
    pub reason: Option<String>,
}

impl TradeReceipt {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Reason string for a rejected trade, falling back to the raw status
    /// when the backend gave none.
    pub fn rejection_reason(&self) -> String {
        self.reason
            .clone()
            .unwrap_or_else(|| format!("backend returned status \"{}\"", self.status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_full_status_parsing() {
        let json = r#"{
            "active": true,
            "portfolio": { "totalValue": 12345.67 },
            "performance": { "dailyChange": -2.5 },
            "alerts": [
                { "time": "10:01", "message": "A", "type": "info" },
                { "time": "10:02", "message": "B", "type": "warning" }
            ],
            "priceSeries": [
                { "timestamp": "10:00", "value": 1800.5 },
                { "timestamp": "10:01", "value": 1801.0 }
            ],
            "volumeSeries": [
                { "timestamp": "10:00", "value": 42.0 }
            ]
        }"#;

        let status: BotStatus = serde_json::from_str(json).unwrap();
        assert!(status.active);
        assert_eq!(status.portfolio.unwrap().total_value, dec!(12345.67));
        assert_eq!(status.performance.unwrap().daily_change, dec!(-2.5));
        assert_eq!(status.alerts.len(), 2);
        assert_eq!(status.alerts[1].kind, AlertKind::Warning);
        assert_eq!(status.price_series.len(), 2);
        assert_eq!(status.price_series[0].value, dec!(1800.5));
        assert_eq!(status.volume_series.len(), 1);
    }

    #[test]
    fn test_partial_status_normalizes() {
        // A bot that just started reports nothing but its run state
        let status: BotStatus = serde_json::from_str(r#"{ "active": false }"#).unwrap();
        assert!(!status.active);
        assert!(status.portfolio.is_none());
        assert!(status.performance.is_none());
        assert!(status.alerts.is_empty());
        assert!(status.price_series.is_empty());
        assert!(status.volume_series.is_empty());
    }

    #[test]
    fn test_empty_object_normalizes() {
        let status: BotStatus = serde_json::from_str("{}").unwrap();
        assert!(!status.active);
        assert!(status.alerts.is_empty());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(serde_json::from_str::<BotStatus>("<html>502</html>").is_err());
    }

    #[test]
    fn test_alert_kind_defaults_to_info() {
        let alert: Alert =
            serde_json::from_str(r#"{ "time": "10:00", "message": "hello" }"#).unwrap();
        assert_eq!(alert.kind, AlertKind::Info);
    }

    #[test]
    fn test_receipt_success() {
        let receipt: TradeReceipt = serde_json::from_str(r#"{ "status": "success" }"#).unwrap();
        assert!(receipt.is_success());
    }

    #[test]
    fn test_receipt_rejection_reason() {
        let receipt: TradeReceipt =
            serde_json::from_str(r#"{ "status": "rejected", "reason": "insufficient funds" }"#)
                .unwrap();
        assert!(!receipt.is_success());
        assert_eq!(receipt.rejection_reason(), "insufficient funds");

        let bare: TradeReceipt = serde_json::from_str(r#"{ "status": "error" }"#).unwrap();
        assert_eq!(bare.rejection_reason(), "backend returned status \"error\"");
    }

    #[test]
    fn test_trade_order_wire_shape() {
        let order = TradeOrder {
            side: TradeSide::Buy,
            amount: dec!(0.5),
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["side"], "buy");
    }
}
