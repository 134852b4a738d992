//! Chart models: allocation (pie), returns (bar), historical price (line).
//!
//! Allocation and returns charts have an explicit degenerate form for an empty
//! portfolio so a drawing back-end never sees an empty series.

use crate::format;
use crate::model::{HistoricalSeries, Position};

/// 24-bit colour, independent of any drawing back-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Slice colours, cycled when there are more positions than entries.
pub const PALETTE: [Rgb; 8] = [
    Rgb(0x66, 0x7e, 0xea),
    Rgb(0x76, 0x4b, 0xa2),
    Rgb(0xf0, 0x93, 0xfb),
    Rgb(0x4f, 0xac, 0xfe),
    Rgb(0x43, 0xe9, 0x7b),
    Rgb(0xfa, 0x70, 0x9a),
    Rgb(0xfe, 0xe1, 0x40),
    Rgb(0x30, 0xcf, 0xd0),
];

pub const PLACEHOLDER_GREY: Rgb = Rgb(0xe0, 0xe0, 0xe0);
pub const GAIN_GREEN: Rgb = Rgb(0x28, 0xa7, 0x45);
pub const LOSS_RED: Rgb = Rgb(0xdc, 0x35, 0x45);
pub const LINE_BLUE: Rgb = Rgb(0x66, 0x7e, 0xea);

pub const NO_DATA: &str = "No Data";

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub value: f64,
    pub color: Rgb,
}

/// Pie chart of current value per position.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationChart {
    pub slices: Vec<Slice>,
    /// Legend and tooltips are off for the placeholder.
    pub interactive: bool,
}

impl AllocationChart {
    pub fn build(positions: &[Position]) -> Self {
        if positions.is_empty() {
            return Self {
                slices: vec![Slice {
                    label: NO_DATA.into(),
                    value: 1.0,
                    color: PLACEHOLDER_GREY,
                }],
                interactive: false,
            };
        }

        let slices = positions
            .iter()
            .enumerate()
            .map(|(i, p)| Slice {
                label: p.ticker.clone(),
                value: p.total_value,
                color: PALETTE[i % PALETTE.len()],
            })
            .collect();
        Self {
            slices,
            interactive: true,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        !self.interactive
    }

    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Share of the whole for slice `i`, in percent.
    pub fn share_pct(&self, i: usize) -> f64 {
        let total = self.total();
        match self.slices.get(i) {
            Some(s) if total != 0.0 => s.value / total * 100.0,
            _ => 0.0,
        }
    }

    /// `"AAPL: $8,775 (27.4%)"` per slice; empty for the placeholder.
    pub fn legend(&self) -> Vec<String> {
        if !self.interactive {
            return Vec::new();
        }
        self.slices
            .iter()
            .enumerate()
            .map(|(i, s)| {
                format!(
                    "{}: {} ({:.1}%)",
                    s.label,
                    format::currency(s.value),
                    self.share_pct(i)
                )
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: Rgb,
}

/// Bar chart of return percentage per position.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnsChart {
    pub bars: Vec<Bar>,
    pub interactive: bool,
}

impl ReturnsChart {
    pub const SERIES_LABEL: &'static str = "Return %";

    pub fn build(positions: &[Position]) -> Self {
        if positions.is_empty() {
            return Self {
                bars: vec![Bar {
                    label: NO_DATA.into(),
                    value: 0.0,
                    color: PLACEHOLDER_GREY,
                }],
                interactive: false,
            };
        }

        let bars = positions
            .iter()
            .map(|p| Bar {
                label: p.ticker.clone(),
                value: p.return_pct,
                color: if p.return_pct >= 0.0 { GAIN_GREEN } else { LOSS_RED },
            })
            .collect();
        Self {
            bars,
            interactive: true,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        !self.interactive
    }

    /// Y axis is anchored at zero: `(min(0, lowest), max(0, highest))`.
    pub fn value_range(&self) -> (f64, f64) {
        self.bars.iter().fold((0.0_f64, 0.0_f64), |(lo, hi), b| {
            (lo.min(b.value), hi.max(b.value))
        })
    }

    pub fn tick_label(value: f64) -> String {
        format::percent(value)
    }

    pub fn tooltip(bar: &Bar) -> String {
        format!("Return: {:.2}%", bar.value)
    }
}

/// Line chart of one ticker's recent prices.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalChart {
    pub ticker: String,
    pub label: String,
    pub dates: Vec<String>,
    pub prices: Vec<f64>,
    pub color: Rgb,
}

impl HistoricalChart {
    pub fn build(series: &HistoricalSeries) -> Self {
        Self {
            ticker: series.ticker().to_string(),
            label: format!("{} Price", series.ticker()),
            dates: series.dates().to_vec(),
            prices: series.prices().to_vec(),
            color: LINE_BLUE,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// `(x, y)` points with x = day index.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.prices
            .iter()
            .enumerate()
            .map(|(i, &p)| (i as f64, p))
            .collect()
    }

    /// Price range with 5% padding; `None` for an empty series.
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        if self.prices.is_empty() {
            return None;
        }
        let min = self.prices.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let pad = ((max - min).abs() * 0.05).max(0.01);
        Some((min - pad, max + pad))
    }

    pub fn tick_label(value: f64) -> String {
        format::price(value)
    }

    pub fn tooltip(price: f64) -> String {
        format!("Price: {}", format::price(price))
    }
}
