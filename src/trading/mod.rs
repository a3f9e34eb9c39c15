pub mod controller;
pub mod order;

pub use controller::{SubmitError, TradeController, TradeState};
pub use order::{TradeRequest, TradeSide};
