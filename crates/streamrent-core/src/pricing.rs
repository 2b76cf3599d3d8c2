//! Human-readable amounts.
//!
//! Prices are entered in nanos per millisecond, which is hard to reason
//! about; the form shows the equivalent IOTA per hour next to the field.

use crate::config::NANOS_PER_IOTA;

const MILLIS_PER_HOUR: u128 = 3_600_000;
const FRACTION_DIGITS: u32 = 6;

/// IOTA per hour for a price in nanos per millisecond, e.g. `6` → `0.0216`.
pub fn price_per_hour(price_per_ms: u64) -> String {
    format_nanos(u128::from(price_per_ms) * MILLIS_PER_HOUR)
}

/// Format nanos as IOTA: grouped thousands, at most six fraction digits,
/// rounded half up, trailing zeros dropped.
pub fn format_nanos(nanos: u128) -> String {
    let per_iota = u128::from(NANOS_PER_IOTA);
    let scale = per_iota / 10u128.pow(FRACTION_DIGITS);

    let mut whole = nanos / per_iota;
    let mut fraction = (nanos % per_iota + scale / 2) / scale;
    if fraction == 10u128.pow(FRACTION_DIGITS) {
        whole += 1;
        fraction = 0;
    }

    let grouped = group_thousands(whole);
    if fraction == 0 {
        return grouped;
    }

    let digits = format!("{fraction:0width$}", width = FRACTION_DIGITS as usize);
    format!("{grouped}.{}", digits.trim_end_matches('0'))
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_for_default_price() {
        assert_eq!(price_per_hour(6), "0.0216");
        assert_eq!(price_per_hour(1), "0.0036");
        assert_eq!(price_per_hour(0), "0");
    }

    #[test]
    fn large_prices_are_grouped() {
        assert_eq!(price_per_hour(1_000_000), "3,600");
        assert_eq!(format_nanos(1_234_567_000_000_000), "1,234,567");
    }

    #[test]
    fn deposit_formats_as_whole_iota() {
        assert_eq!(format_nanos(u128::from(crate::config::DEPOSIT_AMOUNT)), "2");
    }

    #[test]
    fn rounds_to_six_fraction_digits() {
        assert_eq!(format_nanos(1), "0");
        assert_eq!(format_nanos(500), "0.000001");
        assert_eq!(format_nanos(1_999_999_999), "2");
        assert_eq!(format_nanos(1_500_000_000), "1.5");
    }
}
