//! Input state management for the TUI
//!
//! Handles the normal navigation mode and the modal dialogs (help, trade
//! entry). The rendering layer only reads this state; key handling in the
//! app loop mutates it.

use crate::trading::order::TradeSide;

/// Current input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Modal dialog is active
    Dialog(DialogType),
}

/// Type of dialog currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogType {
    Help,
    Trade,
}

/// Complete input state
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub mode: InputMode,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_normal(&self) -> bool {
        matches!(self.mode, InputMode::Normal)
    }

    pub fn is_dialog(&self) -> bool {
        matches!(self.mode, InputMode::Dialog(_))
    }

    pub fn show_help(&mut self) {
        self.mode = InputMode::Dialog(DialogType::Help);
    }

    pub fn show_trade(&mut self) {
        self.mode = InputMode::Dialog(DialogType::Trade);
    }

    pub fn close_dialog(&mut self) {
        self.mode = InputMode::Normal;
    }
}

/// State for the trade entry dialog
#[derive(Debug, Clone)]
pub struct TradeDialogState {
    pub side: TradeSide,
    pub amount: String,
    pub error_message: Option<String>,
}

impl TradeDialogState {
    pub fn new_buy() -> Self {
        Self {
            side: TradeSide::Buy,
            amount: String::new(),
            error_message: None,
        }
    }

    pub fn new_sell() -> Self {
        Self {
            side: TradeSide::Sell,
            amount: String::new(),
            error_message: None,
        }
    }

    /// Append a character to the amount field. Editing clears any stale
    /// validation error.
    pub fn push_char(&mut self, c: char) {
        self.amount.push(c);
        self.error_message = None;
    }

    pub fn backspace(&mut self) {
        self.amount.pop();
        self.error_message = None;
    }

    pub fn set_error(&mut self, msg: &str) {
        self.error_message = Some(msg.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_transitions() {
        let mut input = InputState::new();
        assert!(input.is_normal());

        input.show_trade();
        assert_eq!(input.mode, InputMode::Dialog(DialogType::Trade));
        assert!(input.is_dialog());

        input.close_dialog();
        assert!(input.is_normal());
    }

    #[test]
    fn test_editing_clears_error() {
        let mut dialog = TradeDialogState::new_buy();
        dialog.set_error("invalid amount");
        assert!(dialog.error_message.is_some());

        dialog.push_char('1');
        assert!(dialog.error_message.is_none());
        assert_eq!(dialog.amount, "1");

        dialog.set_error("again");
        dialog.backspace();
        assert!(dialog.error_message.is_none());
        assert!(dialog.amount.is_empty());
    }
}
