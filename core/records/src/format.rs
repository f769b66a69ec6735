//! FILENAME: core/records/src/format.rs
//! PURPOSE: Fixed-locale (en-US) number formatting for table cells and KPIs.
//! CONTEXT: Column renderers and the dashboard prop bags call these helpers.
//! en-US only; there is no locale parameter.

/// Formats a number with the given decimal places and `,` thousands separators.
pub fn format_number(value: f64, decimal_places: usize) -> String {
    let value = normalize(value);
    let rounded = format!("{:.prec$}", value, prec = decimal_places);
    add_thousands_separator(unsigned_if_zero(&rounded))
}

/// Formats a currency amount as `$1,234.50`; negatives as `-$1,234.50`.
pub fn format_currency(value: f64, decimal_places: usize) -> String {
    let value = normalize(value);
    let body = format_number(value.abs(), decimal_places);
    if value < 0.0 && !is_all_zeros(&body) {
        format!("-${}", body)
    } else {
        format!("${}", body)
    }
}

/// Formats a ratio as a percentage: 0.125 -> "12.5%".
pub fn format_percent(ratio: f64, decimal_places: usize) -> String {
    format!("{}%", format_number(ratio * 100.0, decimal_places))
}

/// Short magnitude form used on chart axes: 1200 -> "1.2K", 3400000 -> "3.4M".
pub fn format_compact(value: f64) -> String {
    let value = normalize(value);
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1e9 {
        (value / 1e9, "B")
    } else if abs >= 1e6 {
        (value / 1e6, "M")
    } else if abs >= 1e3 {
        (value / 1e3, "K")
    } else {
        (value, "")
    };

    let text = format!("{:.1}", scaled);
    let text = unsigned_if_zero(&text)
        .trim_end_matches('0')
        .trim_end_matches('.');
    format!("{}{}", text, suffix)
}

fn normalize(value: f64) -> f64 {
    if !value.is_finite() || value == 0.0 {
        0.0
    } else {
        value
    }
}

/// True when a formatted number has no non-zero digit.
fn is_all_zeros(s: &str) -> bool {
    !s.chars().any(|c| c.is_ascii_digit() && c != '0')
}

/// Drops the sign of a rounded value that came out as zero ("-0.00" -> "0.00").
fn unsigned_if_zero(s: &str) -> &str {
    match s.strip_prefix('-') {
        Some(rest) if is_all_zeros(rest) => rest,
        _ => s,
    }
}

fn add_thousands_separator(s: &str) -> String {
    let (integer_part, decimal_part) = match s.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (s, None),
    };

    let negative = integer_part.starts_with('-');
    let digits: Vec<char> = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::with_capacity(s.len() + digits.len() / 3 + 1);
    if negative {
        result.push('-');
    }
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    if let Some(d) = decimal_part {
        result.push('.');
        result.push_str(d);
    }
    result
}
