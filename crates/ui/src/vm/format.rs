use chrono::{DateTime, Utc};

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Thousands-grouped number with at most two decimals, trailing zeros dropped.
#[must_use]
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let rounded = format!("{:.2}", value.abs());
    let (whole, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let fraction = fraction.trim_end_matches('0');
    let sign = if value < 0.0 && !rounded.trim_matches(['0', '.']).is_empty() {
        "-"
    } else {
        ""
    };
    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

#[must_use]
pub fn format_dollars(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("${}", format_amount(v)))
}

/// Fraction in `[0, 1]` as a one-decimal percentage.
#[must_use]
pub fn format_confidence(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}
