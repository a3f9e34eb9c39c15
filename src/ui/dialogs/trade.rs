//! Trade entry dialog for Buy/Sell

use crate::trading::order::TradeSide;
use crate::ui::input::TradeDialogState;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Trade dialog widget
pub struct TradeDialog<'a> {
    state: &'a TradeDialogState,
}

impl<'a> TradeDialog<'a> {
    pub fn new(state: &'a TradeDialogState) -> Self {
        Self { state }
    }

    /// Calculate centered rect for dialog
    fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_layout = Layout::vertical([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

        Layout::horizontal([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
    }
}

impl Widget for TradeDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog_area = Self::centered_rect(45, 40, area);

        // Clear background
        Clear.render(dialog_area, buf);

        let title = match self.state.side {
            TradeSide::Buy => " BUY ",
            TradeSide::Sell => " SELL ",
        };

        let border_color = match self.state.side {
            TradeSide::Buy => Color::Green,
            TradeSide::Sell => Color::Red,
        };

        let block = Block::default()
            .title(title)
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(Color::Black));

        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);

        let label_style = Style::default().fg(Color::DarkGray);
        let value_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let error_style = Style::default().fg(Color::Red);

        let amount_display = if self.state.amount.is_empty() {
            "0.0".to_string()
        } else {
            self.state.amount.clone()
        };

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("Amount (ETH): ", label_style),
                Span::styled(format!("[{}]", amount_display), value_style),
            ]),
            Line::from(""),
        ];

        if let Some(ref error) = self.state.error_message {
            lines.push(Line::from(vec![Span::styled(error.as_str(), error_style)]));
            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![Span::styled(
            "Enter: submit    Esc: cancel",
            label_style,
        )]));

        let paragraph = Paragraph::new(lines).alignment(Alignment::Left);

        // Add some padding
        let padded = Rect {
            x: inner.x + 2,
            y: inner.y + 1,
            width: inner.width.saturating_sub(4),
            height: inner.height.saturating_sub(2),
        };

        paragraph.render(padded, buf);
    }
}
