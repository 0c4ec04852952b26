//! Display helpers for decimal amounts.
//!
//! Project amounts and service prices are nullable decimals. A service
//! without a price is sold "on request".

use rust_decimal::{Decimal, RoundingStrategy};

/// Rendered for a service whose price is `None`.
pub const PRICE_ON_REQUEST: &str = "Price on request";

/// Format an amount as dollars with two decimals and thousands separators.
///
/// ```
/// use atrium_core::format_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_amount(Decimal::new(125_000_50, 2)), "$125,000.50");
/// assert_eq!(format_amount(Decimal::new(-45, 1)), "-$4.50");
/// ```
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{cents}")
}

/// Format an optional service price.
#[must_use]
pub fn format_price(price: Option<Decimal>) -> String {
    price.map_or_else(|| PRICE_ON_REQUEST.to_string(), format_amount)
}
