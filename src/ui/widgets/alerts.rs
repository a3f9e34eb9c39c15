use crate::api::models::{Alert, AlertKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Widget},
};

/// A renderable alert row: the alert plus a stable display key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRow<'a> {
    pub key: String,
    pub alert: &'a Alert,
}

/// The first `max_items` alerts, backend order preserved.
///
/// No filtering or sorting happens here; ordering is entirely the backend's
/// contract. The key is derived from (time, message) so repeated renders
/// keep stable identities for unchanged rows.
pub fn alert_rows(alerts: &[Alert], max_items: usize) -> Vec<AlertRow<'_>> {
    alerts
        .iter()
        .take(max_items)
        .map(|alert| AlertRow {
            key: format!("{}|{}", alert.time, alert.message),
            alert,
        })
        .collect()
}

pub struct AlertsWidget<'a> {
    rows: &'a [AlertRow<'a>],
}

impl<'a> AlertsWidget<'a> {
    pub fn new(rows: &'a [AlertRow<'a>]) -> Self {
        Self { rows }
    }
}

impl Widget for AlertsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Recent Alerts ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 20 || inner.height < 1 {
            return;
        }

        if self.rows.is_empty() {
            let msg = "No alerts";
            let x = inner.x + (inner.width.saturating_sub(msg.len() as u16)) / 2;
            let y = inner.y + inner.height / 2;
            buf.set_string(x, y, msg, Style::default().fg(Color::DarkGray));
            return;
        }

        for (i, row) in self.rows.iter().enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.y + inner.height {
                break;
            }

            let color = match row.alert.kind {
                AlertKind::Info => Color::White,
                AlertKind::Warning => Color::Yellow,
                AlertKind::Error => Color::Red,
            };

            let time = format!("[{}]", row.alert.time);
            buf.set_string(inner.x + 1, y, &time, Style::default().fg(Color::DarkGray));

            let msg_x = inner.x + 1 + time.len() as u16 + 1;
            let available = (inner.x + inner.width).saturating_sub(msg_x) as usize;
            let message: String = row.alert.message.chars().take(available).collect();
            buf.set_string(msg_x, y, &message, Style::default().fg(color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(time: &str, message: &str, kind: AlertKind) -> Alert {
        Alert {
            time: time.to_string(),
            message: message.to_string(),
            kind,
        }
    }

    #[test]
    fn test_rows_preserve_backend_order() {
        let alerts = vec![
            alert("10:01", "A", AlertKind::Info),
            alert("10:02", "B", AlertKind::Warning),
        ];

        let rows = alert_rows(&alerts, 5);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].alert, &alerts[0]);
        assert_eq!(rows[1].alert, &alerts[1]);
    }

    #[test]
    fn test_rows_are_bounded() {
        let alerts: Vec<Alert> = (0..10)
            .map(|i| alert(&format!("10:{:02}", i), "tick", AlertKind::Info))
            .collect();

        let rows = alert_rows(&alerts, 3);
        assert_eq!(rows.len(), 3);
        // The first N, not the last N
        assert_eq!(rows[0].alert.time, "10:00");
        assert_eq!(rows[2].alert.time, "10:02");
    }

    #[test]
    fn test_key_is_stable_across_renders() {
        let alerts = vec![alert("10:01", "A", AlertKind::Info)];

        let first = alert_rows(&alerts, 5);
        let second = alert_rows(&alerts, 5);
        assert_eq!(first[0].key, second[0].key);
        assert_eq!(first[0].key, "10:01|A");
    }

    #[test]
    fn test_empty_feed_yields_no_rows() {
        assert!(alert_rows(&[], 5).is_empty());
    }
}
