use crate::trading::{TradeSide, TradeState};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Widget},
};

/// Panel showing the manual trade slot: key hints when idle, the in-flight
/// request while pending, and the terminal result until dismissed.
pub struct TradePanel<'a> {
    state: &'a TradeState,
}

impl<'a> TradePanel<'a> {
    pub fn new(state: &'a TradeState) -> Self {
        Self { state }
    }
}

impl Widget for TradePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Manual Trade ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 24 || inner.height < 2 {
            return;
        }

        let dim = Style::default().fg(Color::DarkGray);

        match self.state {
            TradeState::Idle => {
                buf.set_string(inner.x + 1, inner.y, "b: buy    s: sell", dim);
            }
            TradeState::Pending(request) => {
                let line = format!("Submitting {} {} ...", request.side, request.amount);
                buf.set_string(
                    inner.x + 1,
                    inner.y,
                    &line,
                    Style::default().fg(Color::Yellow),
                );
                let time = format!("sent {}", request.submitted_at.format("%H:%M:%S"));
                if inner.height > 1 {
                    buf.set_string(inner.x + 1, inner.y + 1, &time, dim);
                }
            }
            TradeState::Accepted(request) => {
                let side_color = match request.side {
                    TradeSide::Buy => Color::Green,
                    TradeSide::Sell => Color::Red,
                };
                let line = format!("{} {} accepted", request.side, request.amount);
                buf.set_string(
                    inner.x + 1,
                    inner.y,
                    &line,
                    Style::default().fg(side_color).add_modifier(Modifier::BOLD),
                );
                if inner.height > 1 {
                    buf.set_string(inner.x + 1, inner.y + 1, "a: dismiss", dim);
                }
            }
            TradeState::Rejected(request, reason) => {
                let line = format!("{} {} rejected", request.side, request.amount);
                buf.set_string(
                    inner.x + 1,
                    inner.y,
                    &line,
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                );
                if inner.height > 1 {
                    let available = inner.width.saturating_sub(2) as usize;
                    let reason: String = reason.chars().take(available).collect();
                    buf.set_string(
                        inner.x + 1,
                        inner.y + 1,
                        &reason,
                        Style::default().fg(Color::Red),
                    );
                }
                if inner.height > 2 {
                    buf.set_string(inner.x + 1, inner.y + 2, "a: dismiss, b/s: retry", dim);
                }
            }
        }
    }
}
