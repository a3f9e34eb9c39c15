//! Chart adapters and widgets for the price/volume panels.
//!
//! The adapters are pure: they map a status snapshot's series into the
//! renderer's shape, preserving input order and doing no resampling or
//! aggregation. Fitting a series to the available columns is the widgets'
//! concern, not the adapters'.

use crate::api::models::{PricePoint, VolumePoint};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Widget},
};
use rust_decimal::prelude::ToPrimitive;

/// Map a price series into (index, value) points, order preserved.
/// Empty input yields an empty series, never an error.
pub fn price_points(series: &[PricePoint]) -> Vec<(f64, f64)> {
    series
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value.to_f64().unwrap_or(0.0)))
        .collect()
}

/// Map a volume series into bar heights, order preserved.
pub fn volume_bars(series: &[VolumePoint]) -> Vec<f64> {
    series
        .iter()
        .map(|p| p.value.to_f64().unwrap_or(0.0))
        .collect()
}

/// Line chart of the price series.
pub struct PriceChart<'a> {
    series: &'a [PricePoint],
}

impl<'a> PriceChart<'a> {
    pub fn new(series: &'a [PricePoint]) -> Self {
        Self { series }
    }

    fn value_range(points: &[(f64, f64)]) -> (f64, f64) {
        let mut min = f64::MAX;
        let mut max = f64::MIN;

        for (_, value) in points {
            min = min.min(*value);
            max = max.max(*value);
        }

        // Add some padding
        let padding = (max - min) * 0.05;
        (min - padding, max + padding)
    }
}

impl Widget for PriceChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Price ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        block.render(area, buf);

        let points = price_points(self.series);
        if points.is_empty() || inner.width < 12 || inner.height < 4 {
            return;
        }

        let (min, max) = Self::value_range(&points);
        // A flat series still draws: widen the range around it
        let range = if max > min { max - min } else { 1.0 };
        let min = if max > min { min } else { min - 0.5 };

        let height = inner.height as f64;
        let width = inner.width as usize;
        let data_len = points.len();

        for x in 0..width {
            let data_idx = (x * data_len) / width;
            let value = points[data_idx].1;
            let normalized = ((value - min) / range).clamp(0.0, 1.0);
            let y = ((1.0 - normalized) * (height - 1.0)) as u16;

            let py = inner.y + y.min(inner.height - 1);
            buf[(inner.x + x as u16, py)]
                .set_char('•')
                .set_fg(Color::Cyan);
        }

        draw_value_labels(inner, buf, min, min + range);
    }
}

/// Bar chart of the volume series.
pub struct VolumeChart<'a> {
    series: &'a [VolumePoint],
}

impl<'a> VolumeChart<'a> {
    pub fn new(series: &'a [VolumePoint]) -> Self {
        Self { series }
    }
}

impl Widget for VolumeChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Volume ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        block.render(area, buf);

        let bars = volume_bars(self.series);
        if bars.is_empty() || inner.width < 12 || inner.height < 4 {
            return;
        }

        let max = bars.iter().copied().fold(0.0f64, f64::max);
        if max <= 0.0 {
            return;
        }

        let bar_chars = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
        let height = inner.height as usize;
        let width = inner.width as usize;
        let data_len = bars.len();

        for x in 0..width {
            let data_idx = (x * data_len) / width;
            let normalized = (bars[data_idx] / max).clamp(0.0, 1.0);
            let cells = normalized * height as f64;
            let full = cells as usize;
            let fraction = cells - full as f64;

            // Fill from the bottom up, partial glyph on top
            for level in 0..full {
                let y = inner.y + (height - 1 - level) as u16;
                buf[(inner.x + x as u16, y)]
                    .set_char('█')
                    .set_fg(Color::Blue);
            }
            if full < height && fraction > 0.0 {
                let char_idx = ((fraction * 8.0) as usize).min(7);
                let y = inner.y + (height - 1 - full) as u16;
                buf[(inner.x + x as u16, y)]
                    .set_char(bar_chars[char_idx])
                    .set_fg(Color::Blue);
            }
        }

        draw_value_labels(inner, buf, 0.0, max);
    }
}

/// Draw top/middle/bottom range labels along the right edge.
fn draw_value_labels(area: Rect, buf: &mut Buffer, min: f64, max: f64) {
    if area.width < 10 {
        return;
    }

    let label_x = area.x + area.width - 8;
    let range = max - min;

    let labels = [
        (0, max),
        (area.height / 2, min + range / 2.0),
        (area.height - 1, min),
    ];

    for (y_offset, value) in labels {
        let y = area.y + y_offset;
        if y < area.y + area.height {
            let label = format!("{:.2}", value);
            let label_len = label.len().min((area.x + area.width - label_x) as usize);
            for (i, ch) in label.chars().take(label_len).enumerate() {
                let x = label_x + i as u16;
                if x < area.x + area.width {
                    buf[(x, y)].set_char(ch).set_fg(Color::DarkGray);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn point(ts: &str, value: rust_decimal::Decimal) -> PricePoint {
        PricePoint {
            timestamp: ts.to_string(),
            value,
        }
    }

    #[test]
    fn test_price_points_preserve_order() {
        let series = vec![
            point("10:00", dec!(3.0)),
            point("10:01", dec!(1.0)),
            point("10:02", dec!(2.0)),
        ];

        let points = price_points(&series);
        assert_eq!(points, vec![(0.0, 3.0), (1.0, 1.0), (2.0, 2.0)]);
    }

    #[test]
    fn test_empty_price_series_yields_empty_points() {
        assert!(price_points(&[]).is_empty());
    }

    #[test]
    fn test_volume_bars_preserve_order() {
        let series = vec![
            VolumePoint {
                timestamp: "10:00".to_string(),
                value: dec!(5),
            },
            VolumePoint {
                timestamp: "10:01".to_string(),
                value: dec!(2),
            },
        ];

        assert_eq!(volume_bars(&series), vec![5.0, 2.0]);
    }

    #[test]
    fn test_empty_volume_series_yields_empty_bars() {
        assert!(volume_bars(&[]).is_empty());
    }
}
