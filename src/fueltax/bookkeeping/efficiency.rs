use rust_decimal::Decimal;

use crate::util::decimal::is_positive;

/// Total miles over total gallons purchased. None if there was no fuel
/// bought, or the ratio is zero or too large to represent.
pub fn measured_efficiency(total_miles: Decimal, total_gallons: Decimal) -> Option<Decimal> {
    if !is_positive(&total_gallons) {
        return None;
    }
    total_miles.checked_div(total_gallons).filter(is_positive)
}

/// The period-wide fleet efficiency (miles per gallon), applied to every
/// jurisdiction alike.
///
/// The measured efficiency when there is one, otherwise the fleet default
/// supplied by the caller.
pub fn estimate_efficiency(
    total_miles: Decimal,
    total_gallons: Decimal,
    configured_default: Decimal,
) -> Decimal {
    measured_efficiency(total_miles, total_gallons).unwrap_or(configured_default)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::{estimate_efficiency, measured_efficiency};

    #[test]
    fn test_estimate_efficiency() {
        assert_eq!(estimate_efficiency(dec!(800), dec!(100), dec!(6.5)), dec!(8));
        assert_eq!(estimate_efficiency(dec!(1000), dec!(160), dec!(6.5)), dec!(6.25));

        // No fuel
        assert_eq!(estimate_efficiency(dec!(800), dec!(0), dec!(6.5)), dec!(6.5));
        // Fuel but no miles
        assert_eq!(estimate_efficiency(dec!(0), dec!(100), dec!(6.5)), dec!(6.5));
        // Nothing at all
        assert_eq!(estimate_efficiency(dec!(0), dec!(0), dec!(7)), dec!(7));
        // Default is passed through as is, even if zero
        assert_eq!(estimate_efficiency(dec!(0), dec!(0), dec!(0)), dec!(0));
        // Ratio overflows
        assert_eq!(
            estimate_efficiency(dec!(1000), dec!(0.0000000000000000000000000001), dec!(6.5)),
            dec!(6.5));
    }

    #[test]
    fn test_measured_efficiency() {
        assert_eq!(measured_efficiency(dec!(800), dec!(100)), Some(dec!(8)));
        assert_eq!(measured_efficiency(dec!(800), dec!(0)), None);
        assert_eq!(measured_efficiency(dec!(0), dec!(100)), None);
        assert_eq!(measured_efficiency(dec!(1), dec!(-2)), None);
        assert_eq!(measured_efficiency(dec!(1000), dec!(0.0000000000000000000000000001)), None);
    }
}
