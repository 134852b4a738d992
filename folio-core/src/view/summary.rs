//! Summary cards: total value, total cost, gain/loss, overall return.

use crate::format::{self, Sign};
use crate::model::Summary;

/// Display text plus the sign class that colours it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedText {
    pub text: String,
    pub sign: Sign,
}

impl SignedText {
    pub fn new(text: String, value: f64) -> Self {
        Self {
            text,
            sign: Sign::of(value),
        }
    }

    /// CSS-style class name, `"positive"` or `"negative"`.
    pub fn class(&self) -> &'static str {
        self.sign.class()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCards {
    pub total_value: String,
    pub total_cost: String,
    pub gain_loss: SignedText,
    pub overall_return: SignedText,
    pub num_positions: usize,
}

impl SummaryCards {
    pub fn build(summary: &Summary) -> Self {
        Self {
            total_value: format::currency(summary.total_value),
            total_cost: format::currency(summary.total_cost),
            gain_loss: SignedText::new(
                format::currency(summary.total_gain_loss),
                summary.total_gain_loss,
            ),
            overall_return: SignedText::new(
                format::percent(summary.overall_return),
                summary.overall_return,
            ),
            num_positions: summary.num_positions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_totals() {
        let cards = SummaryCards::build(&Summary {
            total_value: 8775.0,
            total_cost: 7500.0,
            total_gain_loss: 1275.0,
            overall_return: 17.0,
            num_positions: 1,
        });
        assert_eq!(cards.total_value, "$8,775");
        assert_eq!(cards.total_cost, "$7,500");
        assert_eq!(cards.gain_loss.text, "$1,275");
        assert_eq!(cards.gain_loss.class(), "positive");
        assert_eq!(cards.overall_return.text, "17%");
    }

    #[test]
    fn losses_are_negative() {
        let cards = SummaryCards::build(&Summary {
            total_value: 13000.0,
            total_cost: 14000.0,
            total_gain_loss: -1000.0,
            overall_return: -7.14,
            num_positions: 1,
        });
        assert_eq!(cards.gain_loss.text, "-$1,000");
        assert_eq!(cards.gain_loss.class(), "negative");
        assert_eq!(cards.overall_return.text, "-7.14%");
        assert_eq!(cards.overall_return.class(), "negative");
    }

    #[test]
    fn break_even_counts_as_positive() {
        let cards = SummaryCards::build(&Summary::default());
        assert_eq!(cards.total_value, "$0");
        assert_eq!(cards.gain_loss.class(), "positive");
        assert_eq!(cards.overall_return.class(), "positive");
    }
}
