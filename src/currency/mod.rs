//! Display formatting for amounts and dates.
//!
//! The privacy toggle is an explicit option the presentation layer passes
//! in per call; the core holds no shared display state.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Placeholder shown instead of amounts when values are hidden.
pub const MASKED_AMOUNT: &str = "R$ \u{2022}\u{2022}\u{2022}\u{2022}";

/// Presentation preferences supplied by the caller.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayOptions {
    pub hide_values: bool,
}

/// Renders an amount in pt-BR style (`R$ 1.234,56`), or the privacy mask
/// when values are hidden.
pub fn format_amount(value: f64, options: &DisplayOptions) -> String {
    if options.hide_values {
        return MASKED_AMOUNT.to_string();
    }
    format!("R$ {}", format_brl(value))
}

fn format_brl(value: f64) -> String {
    let body = format!("{:.2}", value.abs());
    let (int_part, frac_part) = body.split_once('.').unwrap_or((body.as_str(), "00"));
    let grouped = group_digits(int_part, '.');
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{},{}", sign, grouped, frac_part)
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}

/// `dd/mm/yyyy` date rendering for statement rows.
pub fn format_date(moment: NaiveDateTime) -> String {
    moment.format("%d/%m/%Y").to_string()
}

/// `HH:MM` clock rendering for statement rows.
pub fn format_time(moment: NaiveDateTime) -> String {
    moment.format("%H:%M").to_string()
}
