//! Brazilian Portuguese (pt-BR) display formatting.
//!
//! Output matches what a browser produces with `Intl.NumberFormat('pt-BR')`:
//! `.` groups thousands, `,` separates decimals, the currency symbol is
//! followed by a no-break space and percentages carry no space.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::*;

pub const CURRENCY_SYMBOL: &str = "R$";
pub const GROUP_SEPARATOR: char = '.';
pub const DECIMAL_SEPARATOR: char = ',';
/// U+00A0, placed between the currency symbol and the amount.
pub const NO_BREAK_SPACE: char = '\u{a0}';

/// `1234.567` -> `"1.234,57"` for two decimal places. Midpoints round away
/// from zero.
pub fn format_decimal(value: Decimal, decimal_places: u32) -> String {
    let rounded = value
        .abs()
        .round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.*}", decimal_places as usize, rounded);

    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain.as_str(), None),
    };

    let mut out = String::with_capacity(plain.len() + plain.len() / 3 + 1);
    if value.is_sign_negative() && !value.is_zero() {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push(DECIMAL_SEPARATOR);
        out.push_str(frac);
    }
    out
}

/// `16350` -> `"R$ 16.350,00"` (with a no-break space).
pub fn format_currency(value: Money) -> String {
    let number = format_decimal(value, 2);
    match number.strip_prefix('-') {
        Some(abs) => format!("-{CURRENCY_SYMBOL}{NO_BREAK_SPACE}{abs}"),
        None => format!("{CURRENCY_SYMBOL}{NO_BREAK_SPACE}{number}"),
    }
}

/// Value already in percent units: `145.25` -> `"145,25%"`.
pub fn format_percent(value: Percent) -> String {
    format!("{}%", format_decimal(value, 2))
}

/// `dd/mm/yyyy`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency() {
        assert_eq!(format_currency(dec!(16350)), "R$\u{a0}16.350,00");
        assert_eq!(format_currency(dec!(1234.56)), "R$\u{a0}1.234,56");
        assert_eq!(format_currency(dec!(999.999)), "R$\u{a0}1.000,00");
        assert_eq!(format_currency(dec!(0)), "R$\u{a0}0,00");
        assert_eq!(format_currency(dec!(-20000)), "-R$\u{a0}20.000,00");
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_percent(dec!(145.25)), "145,25%");
        assert_eq!(format_percent(dec!(10)), "10,00%");
        assert_eq!(format_percent(dec!(-100)), "-100,00%");
        assert_eq!(format_percent(dec!(1234.5)), "1.234,50%");
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        assert_eq!(format_decimal(dec!(0.005), 2), "0,01");
        assert_eq!(format_decimal(dec!(2.345), 2), "2,35");
        assert_eq!(format_decimal(dec!(-2.345), 2), "-2,35");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(format_decimal(dec!(1234567.891), 2), "1.234.567,89");
        assert_eq!(format_decimal(dec!(100), 0), "100");
        assert_eq!(format_decimal(dec!(123456), 0), "123.456");
    }

    #[test]
    fn test_date() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(format_date(d), "07/03/2026");
    }
}
