//! Amount parsing for locale-formatted statement columns.
//!
//! Debit/credit cells come as "1,234.50", "1.234,50", "S/ 80.00" or plain
//! numbers. Anything that does not parse to a finite, non-negative value is 0.

/// Parse a statement amount. Never fails: unparseable input yields 0.0.
pub fn parse_amount(text: &str) -> f64 {
    let mut s = text.trim();
    for prefix in ["S/.", "S/", "s/", "$"] {
        if let Some(rest) = s.strip_prefix(prefix) {
            s = rest;
            break;
        }
    }

    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    // Digits and separators only: no exponents, no "inf"/"NaN".
    let plain = compact
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-' | '+'));
    if compact.is_empty() || !plain {
        return 0.0;
    }

    let normalized = normalize_separators(&compact);
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

/// Parse an optional cell, treating a missing value as empty.
pub fn parse_optional_amount(text: Option<&str>) -> f64 {
    text.map(parse_amount).unwrap_or(0.0)
}

fn normalize_separators(s: &str) -> String {
    match (s.rfind(','), s.rfind('.')) {
        // Right-most separator is the decimal one.
        (Some(comma), Some(dot)) if comma > dot => s.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => s.replace(',', ""),
        (Some(comma), None) => {
            let decimals = s.len() - comma - 1;
            if s.matches(',').count() == 1 && (1..=2).contains(&decimals) {
                s.replace(',', ".")
            } else {
                s.replace(',', "")
            }
        }
        (None, Some(_)) if s.matches('.').count() > 1 => s.replace('.', ""),
        _ => s.to_string(),
    }
}
