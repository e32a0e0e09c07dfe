use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    fueltax::model::jurisdiction::JurisdictionCode,
    util::decimal::{is_positive, GreaterEqualZeroDecimal},
};

/// A per-mile weight-distance tax charged by a single jurisdiction, on top
/// of (and separately from) IFTA fuel tax.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize)]
pub struct SurchargeRule {
    pub jurisdiction: JurisdictionCode,
    pub name: &'static str,
    pub rate_per_mile: Decimal,
}

/// Kentucky weight-distance tax (KYU), for vehicles over 59,999 lbs.
pub const KENTUCKY_WEIGHT_DISTANCE: SurchargeRule = SurchargeRule {
    jurisdiction: "KY",
    name: "KYU weight-distance tax",
    // $0.0285/mile
    rate_per_mile: Decimal::from_parts(285, 0, 0, false, 4),
};

impl SurchargeRule {
    /// miles x rate, for this rule's jurisdiction only, and only when
    /// there were miles driven there.
    pub fn compute(&self, code: &str, miles: GreaterEqualZeroDecimal) -> Option<Decimal> {
        if code == self.jurisdiction && is_positive(&miles) {
            Some(*(miles * GreaterEqualZeroDecimal::coerce(self.rate_per_mile)))
        } else {
            None
        }
    }
}

impl Default for SurchargeRule {
    fn default() -> Self {
        KENTUCKY_WEIGHT_DISTANCE
    }
}

pub fn compute_surcharge(code: &str, miles: GreaterEqualZeroDecimal) -> Option<Decimal> {
    KENTUCKY_WEIGHT_DISTANCE.compute(code, miles)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::gezdec;

    use super::{compute_surcharge, SurchargeRule, KENTUCKY_WEIGHT_DISTANCE};

    #[test]
    fn test_compute_surcharge() {
        assert_eq!(KENTUCKY_WEIGHT_DISTANCE.rate_per_mile, dec!(0.0285));
        assert_eq!(compute_surcharge("KY", gezdec!(1000)), Some(dec!(28.5)));
        assert_eq!(compute_surcharge("KY", gezdec!(0)), None);
    }

    #[test]
    fn test_surcharge_isolation() {
        for code in ["CO", "KS", "TN", "OR", "ky", ""] {
            assert_eq!(compute_surcharge(code, gezdec!(0)), None, "{code}");
            assert_eq!(compute_surcharge(code, gezdec!(5000)), None, "{code}");
        }
    }

    #[test]
    fn test_custom_rule() {
        let rule = SurchargeRule {
            jurisdiction: "NM",
            name: "NM weight-distance tax",
            rate_per_mile: dec!(0.0437),
        };
        assert_eq!(rule.compute("NM", gezdec!(100)), Some(dec!(4.37)));
        assert_eq!(rule.compute("KY", gezdec!(100)), None);
        assert_eq!(SurchargeRule::default(), KENTUCKY_WEIGHT_DISTANCE);
    }
}
