//! Display formatting for monetary values, percentages, and volumes.
//!
//! Stateless string transformations used by panels and labels; no rounding
//! semantics beyond what the display needs.

/// Whole-dollar USD with thousands separators, e.g. `$45,000` / `-$1,250`.
pub fn currency(value: f64) -> String {
    let negative = value < 0.0;
    let rounded = value.abs().round() as u128;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Sign-prefixed two-decimal percent, e.g. `+3.25%` / `-0.40%`.
pub fn percentage(value: f64) -> String {
    if value >= 0.0 {
        format!("+{value:.2}%")
    } else {
        format!("{value:.2}%")
    }
}

/// Suffixed magnitude, e.g. `1.2B`, `45.0M`, `3.1K`, `950`.
pub fn volume(value: f64) -> String {
    if value >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if value >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if value >= 1e3 {
        format!("{:.1}K", value / 1e3)
    } else {
        format!("{value:.0}")
    }
}
