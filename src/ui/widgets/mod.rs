pub mod alerts;
pub mod metrics;
pub mod trade;

pub use alerts::AlertsWidget;
pub use metrics::MetricsWidget;
pub use trade::TradePanel;
