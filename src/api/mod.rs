pub mod client;
pub mod error;
pub mod models;

pub use client::BotApiClient;
pub use error::ApiError;
pub use models::{
    Alert, AlertKind, BotStatus, Performance, Portfolio, PricePoint, TradeReceipt, VolumePoint,
};
