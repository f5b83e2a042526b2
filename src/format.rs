//! Display Formatting
//!
//! Indonesian number and date presentation shared by tables, keyword
//! search and exports.

use chrono::NaiveDate;

/// `1500000` -> `Rp 1.500.000`
pub fn rupiah(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

pub fn optional_rupiah(amount: Option<i64>) -> String {
    amount.map(rupiah).unwrap_or_else(|| "-".to_string())
}

/// `2024-03-01` -> `01/03/2024`
pub fn date(value: NaiveDate) -> String {
    value.format("%d/%m/%Y").to_string()
}

pub fn optional_date(value: Option<NaiveDate>) -> String {
    value.map(date).unwrap_or_else(|| "-".to_string())
}

/// Value of an `<input type="date">`
pub fn input_date(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub fn parse_input_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Cell text for optional strings
pub fn text(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}
