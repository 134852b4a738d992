//! Positions table: one row per position, or a single placeholder row.

use super::summary::SignedText;
use crate::format;
use crate::model::Position;

pub const COLUMNS: [&str; 9] = [
    "Ticker",
    "Shares",
    "Purchase Price",
    "Current Price",
    "Total Value",
    "Total Cost",
    "Gain/Loss",
    "Return %",
    "Action",
];

pub const EMPTY_MESSAGE: &str = "No positions added yet. Add your first position to get started!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionRow {
    pub ticker: String,
    pub shares: String,
    pub purchase_price: String,
    pub current_price: String,
    pub total_value: String,
    pub total_cost: String,
    pub gain_loss: SignedText,
    pub return_pct: SignedText,
    /// Ticker the row's delete action targets.
    pub delete_target: String,
}

impl PositionRow {
    pub fn build(p: &Position) -> Self {
        Self {
            ticker: p.ticker.clone(),
            shares: format::plain(p.shares),
            purchase_price: format::price(p.purchase_price),
            current_price: format::price(p.current_price),
            total_value: format::currency(p.total_value),
            total_cost: format::currency(p.total_cost),
            gain_loss: SignedText::new(format::currency(p.gain_loss), p.gain_loss),
            return_pct: SignedText::new(format::percent(p.return_pct), p.return_pct),
            delete_target: p.ticker.clone(),
        }
    }

    /// Cell texts in [`COLUMNS`] order.
    pub fn cells(&self) -> [&str; 9] {
        [
            self.ticker.as_str(),
            self.shares.as_str(),
            self.purchase_price.as_str(),
            self.current_price.as_str(),
            self.total_value.as_str(),
            self.total_cost.as_str(),
            self.gain_loss.text.as_str(),
            self.return_pct.text.as_str(),
            "Delete",
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    Position(PositionRow),
    Placeholder(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionTable {
    pub rows: Vec<TableRow>,
}

impl PositionTable {
    pub fn build(positions: &[Position]) -> Self {
        if positions.is_empty() {
            return Self {
                rows: vec![TableRow::Placeholder(EMPTY_MESSAGE)],
            };
        }
        Self {
            rows: positions
                .iter()
                .map(|p| TableRow::Position(PositionRow::build(p)))
                .collect(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.rows.as_slice(), [TableRow::Placeholder(_)])
    }

    /// Position rows only.
    pub fn positions(&self) -> impl Iterator<Item = &PositionRow> {
        self.rows.iter().filter_map(|r| match r {
            TableRow::Position(row) => Some(row),
            TableRow::Placeholder(_) => None,
        })
    }

    /// Delete target of the `index`-th position row.
    pub fn delete_target(&self, index: usize) -> Option<&str> {
        self.positions().nth(index).map(|r| r.delete_target.as_str())
    }
}
