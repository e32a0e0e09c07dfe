use std::{fmt::Display, marker::PhantomData, ops::Deref, str::FromStr};

use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};

use self::constraint::{GreaterEqualZero, Pos};

// These were deprecated as methods on Decimal, so re-implement them.
// Those implementations don't actually do zero checks, and can result
// in weird behaviour.
pub fn is_positive(d: &Decimal) -> bool {
    d.is_sign_positive() && !d.is_zero()
}

pub fn is_negative(d: &Decimal) -> bool {
    d.is_sign_negative() && !d.is_zero()
}

/// Rounds to cents (or hundredths of a gallon), half away from zero.
pub fn round_2dp(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to a whole, non-negative count. Negative values clamp to zero,
/// and values past u64::MAX clamp to it.
pub fn round_whole_u64(d: Decimal) -> u64 {
    if !is_positive(&d) {
        return 0;
    }
    d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .unwrap_or(u64::MAX)
}

pub fn dollar_precision_str(d: &Decimal) -> String {
    format!("{:.2}", d)
}

/// Formats as $x.yy, with the sign ahead of the dollar sign (-$x.yy).
pub fn dollar_str(d: &Decimal) -> String {
    if is_negative(d) {
        format!("-${}", dollar_precision_str(&d.abs()))
    } else {
        format!("${}", dollar_precision_str(&d.abs()))
    }
}

/// Parses user-entered numeric text. Leading '$' and thousands separators
/// are tolerated. An empty string is an error.
pub fn parse_lenient_decimal(s: &str) -> Result<Decimal, String> {
    let trimmed = s.trim();
    let unsigned = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let (neg, unsigned) = match unsigned.strip_prefix("-$") {
        Some(rest) => (true, rest),
        None => (false, unsigned),
    };
    let cleaned: String = unsigned.chars().filter(|c| *c != ',').collect();
    let d = Decimal::from_str(cleaned.trim()).map_err(|e| e.to_string())?;
    Ok(if neg { -d } else { d })
}

pub trait DecConstraint {
    fn is_ok(d: &Decimal) -> bool;
}

pub mod constraint {
    use rust_decimal::Decimal;

    use super::{is_positive, DecConstraint};

    #[derive(PartialEq, Eq, Clone, Copy, Debug)]
    pub struct GreaterEqualZero(());
    impl DecConstraint for GreaterEqualZero {
        fn is_ok(d: &Decimal) -> bool {
            d.is_sign_positive() || d.is_zero()
        }
    }

    #[derive(PartialEq, Eq, Clone, Copy, Debug)]
    pub struct Pos(());
    impl DecConstraint for Pos {
        fn is_ok(d: &Decimal) -> bool {
            is_positive(d)
        }
    }
}

// A constrained instance of Decimal. This can only be created through ::try_from,
// which will enforce the DecConstraint.
//
// PhantomData here is size zero, and is simply to make the compiler happy.
// Otherwise, it will complain that the generic parameter is unused.
pub struct ConstrainedDecimal<CONSTRAINT>(Decimal, PhantomData<CONSTRAINT>);

impl<CONSTRAINT: DecConstraint> TryFrom<Decimal> for ConstrainedDecimal<CONSTRAINT> {
    type Error = String;

    fn try_from(d: Decimal) -> Result<Self, Self::Error> {
        if CONSTRAINT::is_ok(&d) {
            Ok(Self(d, PhantomData))
        } else {
            Err(format!(
                "{} does not match constraints of {}",
                d,
                std::any::type_name::<CONSTRAINT>()
            ))
        }
    }
}

impl<CONSTRAINT: DecConstraint> Deref for ConstrainedDecimal<CONSTRAINT> {
    type Target = Decimal;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<CONSTRAINT: DecConstraint> Display for ConstrainedDecimal<CONSTRAINT> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl<CONSTRAINT: DecConstraint> std::fmt::Debug for ConstrainedDecimal<CONSTRAINT> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.0, f)
    }
}

impl<CONSTRAINT: DecConstraint> PartialEq for ConstrainedDecimal<CONSTRAINT> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<CONSTRAINT: DecConstraint> Eq for ConstrainedDecimal<CONSTRAINT> {}

impl<CONSTRAINT: DecConstraint> Clone for ConstrainedDecimal<CONSTRAINT> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<CONSTRAINT: DecConstraint> Copy for ConstrainedDecimal<CONSTRAINT> {}

// GEZ arithmetic saturates at Decimal::MAX on overflow.

impl std::ops::Add for ConstrainedDecimal<GreaterEqualZero> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0), PhantomData)
    }
}

impl std::ops::AddAssign for ConstrainedDecimal<GreaterEqualZero> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::ops::Mul for ConstrainedDecimal<GreaterEqualZero> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_mul(rhs.0), PhantomData)
    }
}

impl std::iter::Sum for ConstrainedDecimal<GreaterEqualZero> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, d| acc + d)
    }
}

impl ConstrainedDecimal<GreaterEqualZero> {
    pub fn zero() -> Self {
        Self(Decimal::ZERO, PhantomData)
    }

    /// Clamps negative values to zero. Used where bad input should degrade
    /// rather than fail.
    pub fn coerce(d: Decimal) -> Self {
        Self::try_from(d).unwrap_or_else(|_| Self::zero())
    }

    /// Never divides by zero. Saturates when the divisor is tiny.
    pub fn div(self, rhs: ConstrainedDecimal<Pos>) -> Self {
        Self(self.0.checked_div(rhs.0).unwrap_or(Decimal::MAX), PhantomData)
    }
}

// Convenience aliases
pub type GreaterEqualZeroDecimal = ConstrainedDecimal<constraint::GreaterEqualZero>;
pub type PosDecimal = ConstrainedDecimal<constraint::Pos>;

#[macro_export]
macro_rules! pdec {
    ($arg:literal) => {{
        use rust_decimal_macros::dec;
        $crate::util::decimal::PosDecimal::try_from(dec!($arg)).unwrap()
    }};
}

#[macro_export]
macro_rules! gezdec {
    ($arg:literal) => {{
        use rust_decimal_macros::dec;
        $crate::util::decimal::GreaterEqualZeroDecimal::try_from(dec!($arg)).unwrap()
    }};
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::util::decimal::{
        dollar_precision_str, dollar_str, is_negative, is_positive,
        parse_lenient_decimal, round_2dp, round_whole_u64, ConstrainedDecimal,
        GreaterEqualZeroDecimal,
    };

    use super::{constraint, DecConstraint};

    #[test]
    fn test_decimal_sign_sanity() {
        let mut neg_zero = dec!(0);
        neg_zero.set_sign_negative(true);
        assert_eq!(neg_zero.to_string(), "-0");
        assert!(!is_negative(&neg_zero));
        assert!(neg_zero.is_zero());

        let zero = dec!(0);
        assert!(!is_positive(&zero));
        assert_eq!(zero, neg_zero);
    }

    #[test]
    fn test_constrained_decimal() {
        _test_constrained_decimal::<constraint::GreaterEqualZero>(
            vec![dec!(1), dec!(0), dec!(-0)],
            vec![dec!(-1)],
        );

        _test_constrained_decimal::<constraint::Pos>(
            vec![dec!(1)],
            vec![dec!(-0), dec!(0), dec!(-1)],
        );
    }

    fn _test_constrained_decimal<C: DecConstraint>(
        dec_vals: Vec<Decimal>,
        invalid_dec_vals: Vec<Decimal>,
    ) {
        for inv in invalid_dec_vals {
            let _ = ConstrainedDecimal::<C>::try_from(inv).unwrap_err();
        }

        for dec_val in dec_vals {
            let valid_val = ConstrainedDecimal::<C>::try_from(dec_val).unwrap();
            assert_eq!(*valid_val, dec_val);
            assert_eq!(valid_val.to_string(), dec_val.to_string());
        }
    }

    #[test]
    fn test_gez_coerce_and_ops() {
        assert_eq!(*GreaterEqualZeroDecimal::coerce(dec!(-3.5)), dec!(0));
        assert_eq!(*GreaterEqualZeroDecimal::coerce(dec!(3.5)), dec!(3.5));

        let total: GreaterEqualZeroDecimal =
            vec![gezdec!(1.5), gezdec!(2), gezdec!(0)].into_iter().sum();
        assert_eq!(*total, dec!(3.5));

        assert_eq!(*gezdec!(500).div(pdec!(8)), dec!(62.5));
    }

    #[test]
    fn test_gez_ops_saturate() {
        let max = GreaterEqualZeroDecimal::coerce(Decimal::MAX);
        assert_eq!(*(max + gezdec!(1)), Decimal::MAX);
        assert_eq!(*(max * gezdec!(2)), Decimal::MAX);
        let total: GreaterEqualZeroDecimal = vec![max, max, gezdec!(5)].into_iter().sum();
        assert_eq!(*total, Decimal::MAX);
        assert_eq!(*gezdec!(1000).div(pdec!(0.0000000000000000000000000001)), Decimal::MAX);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round_2dp(dec!(20.3125)), dec!(20.31));
        assert_eq!(round_2dp(dec!(1.005)), dec!(1.01));
        assert_eq!(round_2dp(dec!(-12.1875)), dec!(-12.19));
        assert_eq!(round_2dp(dec!(-2.4375)), dec!(-2.44));

        assert_eq!(round_whole_u64(dec!(499.5)), 500);
        assert_eq!(round_whole_u64(dec!(499.49)), 499);
        assert_eq!(round_whole_u64(dec!(-4)), 0);
        assert_eq!(round_whole_u64(Decimal::MAX), u64::MAX);
    }

    #[test]
    fn test_dollar_str() {
        assert_eq!(dollar_precision_str(&dec!(1000)), "1000.00");
        assert_eq!(dollar_precision_str(&dec!(1.123456)), "1.12");
        assert_eq!(dollar_str(&dec!(20.31)), "$20.31");
        assert_eq!(dollar_str(&dec!(-12.19)), "-$12.19");
        assert_eq!(dollar_str(&dec!(0)), "$0.00");
    }

    #[test]
    fn test_parse_lenient_decimal() {
        assert_eq!(parse_lenient_decimal("12.5").unwrap(), dec!(12.5));
        assert_eq!(parse_lenient_decimal(" $1,204.10 ").unwrap(), dec!(1204.10));
        assert_eq!(parse_lenient_decimal("-$3").unwrap(), dec!(-3));
        assert_eq!(parse_lenient_decimal("-7").unwrap(), dec!(-7));
        let _ = parse_lenient_decimal("").unwrap_err();
        let _ = parse_lenient_decimal("abc").unwrap_err();
    }
}
