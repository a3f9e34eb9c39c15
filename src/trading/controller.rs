//! State machine for the single manual trade slot.
//!
//! At most one trade request exists at a time. Submission is validated
//! client-side before any request object is constructed; a request in
//! flight refuses further submissions until it resolves.

use crate::trading::order::{TradeRequest, TradeSide};
use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;

/// Lifecycle of the manual trade slot.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TradeState {
    #[default]
    Idle,
    Pending(TradeRequest),
    Accepted(TradeRequest),
    Rejected(TradeRequest, String),
}

/// Client-side refusals. Nothing reaches the network when these fire.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("a trade is already in flight")]
    InFlight,
}

#[derive(Debug, Default)]
pub struct TradeController {
    state: TradeState,
}

impl TradeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &TradeState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, TradeState::Pending(_))
    }

    /// Validate raw input and admit a new request.
    ///
    /// Allowed from `Idle`; a terminal state is acknowledged implicitly.
    /// Refused while a request is pending. On success the caller must
    /// dispatch the returned request exactly once.
    pub fn submit(&mut self, side: TradeSide, raw_amount: &str) -> Result<TradeRequest, SubmitError> {
        if self.is_pending() {
            return Err(SubmitError::InFlight);
        }

        let amount = parse_amount(raw_amount)?;
        let request = TradeRequest {
            side,
            amount,
            submitted_at: Utc::now(),
        };
        self.state = TradeState::Pending(request.clone());
        Ok(request)
    }

    /// The backend accepted the pending request. No-op in any other state.
    pub fn resolve_accepted(&mut self) {
        self.state = match std::mem::take(&mut self.state) {
            TradeState::Pending(request) => TradeState::Accepted(request),
            other => other,
        };
    }

    /// The pending request failed: backend rejection, transport error, or
    /// timeout. The reason is carried into the terminal state, never
    /// dropped. No-op in any other state.
    pub fn resolve_rejected(&mut self, reason: impl Into<String>) {
        self.state = match std::mem::take(&mut self.state) {
            TradeState::Pending(request) => TradeState::Rejected(request, reason.into()),
            other => other,
        };
    }

    /// Dismiss a terminal result, returning to `Idle`.
    pub fn acknowledge(&mut self) {
        if matches!(self.state, TradeState::Accepted(_) | TradeState::Rejected(..)) {
            self.state = TradeState::Idle;
        }
    }
}

fn parse_amount(raw: &str) -> Result<Decimal, SubmitError> {
    let trimmed = raw.trim();
    let amount: Decimal = trimmed
        .parse()
        .map_err(|_| SubmitError::InvalidAmount(format!("\"{}\" is not a number", trimmed)))?;

    if amount <= Decimal::ZERO {
        return Err(SubmitError::InvalidAmount(
            "amount must be positive".to_string(),
        ));
    }

    Ok(amount)
}
