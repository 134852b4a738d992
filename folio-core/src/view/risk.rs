//! Risk metric text fields.

use crate::format;
use crate::model::RiskMetrics;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskPanel {
    pub volatility: String,
    pub sharpe_ratio: String,
    pub max_gain: String,
    pub max_loss: String,
    pub avg_return: String,
    /// `"positive / total"`
    pub positive_positions: String,
}

impl RiskPanel {
    pub fn build(m: &RiskMetrics) -> Self {
        let counted = u64::from(m.positive_positions) + u64::from(m.negative_positions);
        Self {
            volatility: format::plain(m.volatility),
            sharpe_ratio: format::plain(m.sharpe_ratio),
            max_gain: format::percent(m.max_gain),
            max_loss: format::percent(m.max_loss),
            avg_return: format::percent(m.avg_return),
            positive_positions: format!("{} / {}", m.positive_positions, counted),
        }
    }

    /// `(label, value)` pairs in display order.
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("Volatility", self.volatility.as_str()),
            ("Sharpe Ratio", self.sharpe_ratio.as_str()),
            ("Max Gain", self.max_gain.as_str()),
            ("Max Loss", self.max_loss.as_str()),
            ("Avg Return", self.avg_return.as_str()),
            ("Positive Positions", self.positive_positions.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_six_fields() {
        let panel = RiskPanel::build(&RiskMetrics {
            volatility: 9.62,
            sharpe_ratio: 0.85,
            max_gain: 17.0,
            max_loss: -7.14,
            avg_return: 8.17,
            positive_positions: 4,
            negative_positions: 1,
        });
        assert_eq!(panel.volatility, "9.62");
        assert_eq!(panel.sharpe_ratio, "0.85");
        assert_eq!(panel.max_gain, "17%");
        assert_eq!(panel.max_loss, "-7.14%");
        assert_eq!(panel.avg_return, "8.17%");
        assert_eq!(panel.positive_positions, "4 / 5");
        assert_eq!(panel.fields()[5].0, "Positive Positions");
    }

    #[test]
    fn empty_portfolio_metrics() {
        let panel = RiskPanel::build(&RiskMetrics::default());
        assert_eq!(panel.volatility, "0");
        assert_eq!(panel.positive_positions, "0 / 0");
    }

    #[test]
    fn position_counts_do_not_overflow() {
        let panel = RiskPanel::build(&RiskMetrics {
            positive_positions: u32::MAX,
            negative_positions: u32::MAX,
            ..Default::default()
        });
        assert_eq!(panel.positive_positions, "4294967295 / 8589934590");
    }
}
