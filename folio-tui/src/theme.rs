//! Colour and style tokens for the dashboard TUI.
//!
//! # Color Palette
//! - **Accent**: indigo, the dashboard's primary chart colour (focus, headings)
//! - **Positive**: green (gains, confirmations)
//! - **Negative**: red (losses, failed writes)
//! - **Warning**: amber (passive read failures)
//! - **Neutral**: violet (secondary highlights)
//! - **Muted**: slate grey (labels, hints, placeholders)

use ratatui::style::{Color, Modifier, Style};

use folio_core::format::Sign;
use folio_core::view::Rgb;

pub const ACCENT: Color = Color::Rgb(102, 126, 234);
pub const POSITIVE: Color = Color::Rgb(40, 167, 69);
pub const NEGATIVE: Color = Color::Rgb(220, 53, 69);
pub const WARNING: Color = Color::Rgb(255, 159, 64);
pub const NEUTRAL: Color = Color::Rgb(118, 75, 162);
pub const MUTED: Color = Color::Rgb(140, 148, 160);

/// Chart colours come from the view models; terminals take them as-is.
pub fn rgb(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

/// Gain/loss colouring: zero counts as a gain.
pub fn sign_style(sign: Sign) -> Style {
    match sign {
        Sign::Positive => positive(),
        Sign::Negative => negative(),
    }
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_colours() {
        assert_eq!(sign_style(Sign::of(0.0)), positive());
        assert_eq!(sign_style(Sign::of(-0.01)), negative());
    }

    #[test]
    fn chart_rgb_passes_through() {
        assert_eq!(rgb(Rgb(40, 167, 69)), POSITIVE);
    }
}
