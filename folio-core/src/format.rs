//! Display formatting for dashboard figures.
//!
//! Grouped numbers follow en-US locale rules: comma thousands separators, at
//! most three fraction digits, no trailing zeros.

/// Sign class attached to gain/loss and return figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// Zero counts as positive; NaN as negative.
    pub fn of(value: f64) -> Self {
        if value >= 0.0 {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Sign::Positive => "positive",
            Sign::Negative => "negative",
        }
    }
}

/// `8775.0` → `"8,775"`, `1234.5678` → `"1,234.568"`.
pub fn grouped(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞".into() } else { "-∞".into() };
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    let is_zero = int_part.bytes().all(|b| b == b'0') && frac.is_empty();
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Locale-grouped dollars: `"$8,775"`, `"-$1,234.5"`.
pub fn currency(value: f64) -> String {
    let g = grouped(value);
    match g.strip_prefix('-') {
        Some(rest) => format!("-${rest}"),
        None => format!("${g}"),
    }
}

/// Unit price with exactly two decimals: `"$175.50"`.
pub fn price(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", value.abs())
    } else {
        format!("${value:.2}")
    }
}

/// A server number shown as-is: `17.0` → `"17"`, `2.35` → `"2.35"`.
pub fn plain(value: f64) -> String {
    if value == 0.0 {
        // Avoids "-0".
        return "0".to_string();
    }
    format!("{value}")
}

/// A server number with a percent sign: `"17%"`.
pub fn percent(value: f64) -> String {
    format!("{}%", plain(value))
}
