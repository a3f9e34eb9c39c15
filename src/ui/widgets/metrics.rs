use crate::api::models::BotStatus;
use chrono::{DateTime, Utc};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Widget},
};
use rust_decimal::Decimal;

/// Sign of the daily performance reading, for display color and prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSign {
    Pos,
    Neg,
    Flat,
}

/// Display-ready metric labels derived from a status snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metrics {
    pub total_value_label: String,
    pub daily_change_label: Option<String>,
    pub daily_change_sign: ChangeSign,
}

/// Derive display metrics from a snapshot. Pure: identical input yields
/// identical output, no side effects.
///
/// A missing portfolio renders as "0.00"; a missing performance reading
/// renders as no label at all, so "no data" stays distinguishable from a
/// true flat 0.00%.
pub fn derive_metrics(status: &BotStatus) -> Metrics {
    let total_value_label = status
        .portfolio
        .as_ref()
        .map(|p| format!("{:.2}", p.total_value))
        .unwrap_or_else(|| "0.00".to_string());

    let (daily_change_label, daily_change_sign) = match &status.performance {
        Some(perf) => {
            let sign = if perf.daily_change > Decimal::ZERO {
                ChangeSign::Pos
            } else if perf.daily_change < Decimal::ZERO {
                ChangeSign::Neg
            } else {
                ChangeSign::Flat
            };
            (Some(format!("{:.2}", perf.daily_change)), sign)
        }
        None => (None, ChangeSign::Flat),
    };

    Metrics {
        total_value_label,
        daily_change_label,
        daily_change_sign,
    }
}

pub struct MetricsWidget<'a> {
    status: Option<&'a BotStatus>,
    stale: bool,
    last_refresh: Option<DateTime<Utc>>,
}

impl<'a> MetricsWidget<'a> {
    pub fn new(
        status: Option<&'a BotStatus>,
        stale: bool,
        last_refresh: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            status,
            stale,
            last_refresh,
        }
    }
}

impl Widget for MetricsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Bot Status ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 40 || inner.height < 2 {
            return;
        }

        let Some(status) = self.status else {
            let msg = "Waiting for first status...";
            let x = inner.x + (inner.width.saturating_sub(msg.len() as u16)) / 2;
            let y = inner.y + inner.height / 2;
            buf.set_string(x, y, msg, Style::default().fg(Color::DarkGray));
            return;
        };

        let metrics = derive_metrics(status);
        let mut y = inner.y;

        // Run-state headline
        let (headline, headline_color) = if status.active {
            ("● Running", Color::Green)
        } else {
            ("○ Stopped", Color::Red)
        };
        buf.set_string(
            inner.x + 1,
            y,
            headline,
            Style::default()
                .fg(headline_color)
                .add_modifier(Modifier::BOLD),
        );

        if self.stale {
            buf.set_string(
                inner.x + 14,
                y,
                "! STALE DATA",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        }

        if let Some(refreshed) = self.last_refresh {
            let label = format!("updated {}", refreshed.format("%H:%M:%S"));
            if inner.width > label.len() as u16 + 30 {
                buf.set_string(
                    inner.x + inner.width - label.len() as u16 - 1,
                    y,
                    &label,
                    Style::default().fg(Color::DarkGray),
                );
            }
        }

        y += 1;
        if y >= inner.y + inner.height {
            return;
        }

        // Portfolio value
        let value_str = format!("Portfolio Value: ${}", metrics.total_value_label);
        buf.set_string(inner.x + 1, y, &value_str, Style::default().fg(Color::White));

        // 24h performance
        match &metrics.daily_change_label {
            Some(label) => {
                let (prefix, color) = match metrics.daily_change_sign {
                    ChangeSign::Pos => ("+", Color::Green),
                    ChangeSign::Neg => ("", Color::Red),
                    ChangeSign::Flat => ("", Color::Gray),
                };
                let perf_str = format!("24h Performance: {}{}%", prefix, label);
                buf.set_string(inner.x + 35, y, &perf_str, Style::default().fg(color));
            }
            None => {
                buf.set_string(
                    inner.x + 35,
                    y,
                    "24h Performance: --",
                    Style::default().fg(Color::DarkGray),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{Performance, Portfolio};
    use rust_decimal_macros::dec;

    fn status(
        portfolio: Option<Portfolio>,
        performance: Option<Performance>,
    ) -> BotStatus {
        BotStatus {
            active: true,
            portfolio,
            performance,
            ..BotStatus::default()
        }
    }

    #[test]
    fn test_missing_portfolio_defaults_to_zero_label() {
        let metrics = derive_metrics(&status(None, None));
        assert_eq!(metrics.total_value_label, "0.00");
    }

    #[test]
    fn test_total_value_formats_to_two_decimals() {
        let metrics = derive_metrics(&status(
            Some(Portfolio {
                total_value: dec!(12345.678),
            }),
            None,
        ));
        assert_eq!(metrics.total_value_label, "12345.68");

        let metrics = derive_metrics(&status(
            Some(Portfolio {
                total_value: dec!(7),
            }),
            None,
        ));
        assert_eq!(metrics.total_value_label, "7.00");
    }

    #[test]
    fn test_missing_performance_has_no_label() {
        // "No data" must stay distinct from a flat 0.00 reading
        let metrics = derive_metrics(&status(None, None));
        assert_eq!(metrics.daily_change_label, None);
    }

    #[test]
    fn test_daily_change_two_decimals_either_sign() {
        let up = derive_metrics(&status(
            None,
            Some(Performance {
                daily_change: dec!(3.456),
            }),
        ));
        assert_eq!(up.daily_change_label.as_deref(), Some("3.46"));
        assert_eq!(up.daily_change_sign, ChangeSign::Pos);

        let down = derive_metrics(&status(
            None,
            Some(Performance {
                daily_change: dec!(-2.1),
            }),
        ));
        assert_eq!(down.daily_change_label.as_deref(), Some("-2.10"));
        assert_eq!(down.daily_change_sign, ChangeSign::Neg);
    }

    #[test]
    fn test_true_zero_reading_is_flat_not_absent() {
        let flat = derive_metrics(&status(
            None,
            Some(Performance {
                daily_change: dec!(0),
            }),
        ));
        assert_eq!(flat.daily_change_label.as_deref(), Some("0.00"));
        assert_eq!(flat.daily_change_sign, ChangeSign::Flat);
    }

    #[test]
    fn test_derivation_is_repeatable() {
        let s = status(
            Some(Portfolio {
                total_value: dec!(100),
            }),
            Some(Performance {
                daily_change: dec!(1.5),
            }),
        );
        assert_eq!(derive_metrics(&s), derive_metrics(&s));
    }
}
