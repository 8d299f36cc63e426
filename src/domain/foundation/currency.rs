//! Rupiah formatting in Indonesian locale conventions.
//!
//! Thousands are grouped with `.` and decimals separated with `,`, so
//! 26,800,000 renders as `Rp 26.800.000`.

use serde::{Deserialize, Serialize};

/// Presentation mode for currency amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyFormat {
    /// Billions as `M` with two decimals, millions as `jt`, smaller amounts in full.
    #[default]
    Compact,
    /// Every digit, grouped.
    Full,
    /// Always in millions (`jt`), no decimals.
    Juta,
}

/// Formats a whole-rupiah amount, e.g. `Rp 1.234.567`.
pub fn format_idr(amount: f64) -> String {
    format!("Rp {}", group_thousands(amount.round()))
}

/// Formats an amount in the requested presentation mode.
pub fn format_currency(amount: f64, mode: CurrencyFormat) -> String {
    match mode {
        CurrencyFormat::Compact if amount >= 1_000_000_000.0 => {
            format!("Rp {} M", two_decimals(amount / 1_000_000_000.0))
        }
        CurrencyFormat::Compact if amount >= 1_000_000.0 => juta(amount),
        CurrencyFormat::Juta => juta(amount),
        CurrencyFormat::Compact | CurrencyFormat::Full => format_idr(amount),
    }
}

fn juta(amount: f64) -> String {
    format!("Rp {} jt", group_thousands((amount / 1_000_000.0).round()))
}

fn two_decimals(value: f64) -> String {
    let hundredths = (value * 100.0).round();
    let whole = (hundredths / 100.0).trunc();
    let frac = (hundredths - whole * 100.0).abs() as u64;
    format!("{},{:02}", group_thousands(whole), frac)
}

/// Groups the integer part of `value` with `.` separators.
fn group_thousands(value: f64) -> String {
    let negative = value < 0.0;
    let digits = format!("{}", value.abs().trunc() as u128);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if negative && grouped != "0" {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
