//! Help overlay showing all keybindings

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Help overlay widget
pub struct HelpOverlay;

impl HelpOverlay {
    pub fn new() -> Self {
        Self
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

impl Default for HelpOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for HelpOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog_area = Self::centered_rect(50, 60, area);

        // Clear background
        Clear.render(dialog_area, buf);

        let block = Block::default()
            .title(" Help - Keybindings ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .style(Style::default().bg(Color::Black));

        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);

        let header_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(Color::White);
        let dim_style = Style::default().fg(Color::DarkGray);

        let lines = vec![
            Line::from(vec![Span::styled("TRADING", header_style)]),
            Line::from(""),
            Line::from(vec![
                Span::styled("  B         ", key_style),
                Span::styled("Open BUY dialog", desc_style),
            ]),
            Line::from(vec![
                Span::styled("  S         ", key_style),
                Span::styled("Open SELL dialog", desc_style),
            ]),
            Line::from(vec![
                Span::styled("  Enter     ", key_style),
                Span::styled("Submit trade (in dialog)", desc_style),
            ]),
            Line::from(vec![
                Span::styled("  A         ", key_style),
                Span::styled("Dismiss trade result", desc_style),
            ]),
            Line::from(""),
            Line::from(vec![Span::styled("OTHER", header_style)]),
            Line::from(""),
            Line::from(vec![
                Span::styled("  ? / H     ", key_style),
                Span::styled("Show this help", desc_style),
            ]),
            Line::from(vec![
                Span::styled("  q / Esc   ", key_style),
                Span::styled("Quit (close dialog or exit)", desc_style),
            ]),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Press any key to close this help",
                dim_style,
            )]),
        ];

        let paragraph = Paragraph::new(lines).alignment(Alignment::Left);

        paragraph.render(inner, buf);
    }
}
