//! Pricing
//!
//! Donors enter prices as free text ("$1,234.50", "LKR 500", "N/A"). Everything
//! here is lenient: a price that cannot be read is worth zero, never an error.

use std::str::FromStr;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::{lines::CartLine, selection::SelectionState};

/// Parses a free-text price.
///
/// Every character other than an ASCII digit or `.` is dropped, which also
/// removes currency symbols and thousands separators. The longest leading
/// number of the remainder is read, so `"1.2.3"` reads as `1.2`.
///
/// Returns `None` when no digits remain.
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let mut number = String::with_capacity(raw.len() + 1);
    let mut seen_point = false;

    for c in raw.chars().filter(|c| c.is_ascii_digit() || *c == '.') {
        if c == '.' {
            if seen_point {
                break;
            }

            seen_point = true;

            if number.is_empty() {
                number.push('0');
            }
        }

        number.push(c);
    }

    let number = number.trim_end_matches('.');

    if number.is_empty() {
        return None;
    }

    Decimal::from_str(number).ok()
}

/// Value a price contributes to a subtotal: the parsed amount, or zero.
pub fn price_value(raw: &str) -> Decimal {
    parse_price(raw).unwrap_or(Decimal::ZERO)
}

/// Sums the prices of every selected line.
///
/// Pure: the result depends only on the inputs and not on line order.
/// Prices are never negative, so a sum past [`Decimal::MAX`] saturates there
/// instead of overflowing.
pub fn compute_subtotal(lines: &[CartLine], selection: &SelectionState) -> Decimal {
    lines
        .iter()
        .filter(|line| selection.is_selected(&line.id))
        .map(|line| price_value(&line.price))
        .fold(Decimal::ZERO, |total, price| {
            total.checked_add(price).unwrap_or(Decimal::MAX)
        })
}

/// Formats an amount with two decimal places, as shown on the cart screen.
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

/// Wraps an amount in the given currency for display.
pub fn to_money(amount: Decimal, currency: &'static Currency) -> Money<'static, Currency> {
    Money::from_decimal(amount.round_dp(2), currency)
}
