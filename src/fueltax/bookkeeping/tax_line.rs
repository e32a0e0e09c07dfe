use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    fueltax::model::{
        jurisdiction::{jurisdiction_info, JurisdictionInfo},
        report::JurisdictionTaxLine,
    },
    util::decimal::{round_2dp, round_whole_u64, GreaterEqualZeroDecimal, PosDecimal},
};

/// Tax figures for one jurisdiction, at full precision. Totals across
/// jurisdictions should be summed from these, and only rounded at the end.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct JurisdictionTax {
    pub jurisdiction: &'static JurisdictionInfo,
    pub miles: GreaterEqualZeroDecimal,
    pub gallons_purchased: GreaterEqualZeroDecimal,
    pub fuel_consumed: GreaterEqualZeroDecimal,
    pub tax_owed: GreaterEqualZeroDecimal,
    pub tax_paid: GreaterEqualZeroDecimal,
}

impl JurisdictionTax {
    pub fn rate(&self) -> Decimal {
        self.jurisdiction.fuel_tax_rate_per_gallon
    }

    pub fn net_tax(&self) -> Decimal {
        *self.tax_owed - *self.tax_paid
    }

    /// Rounds everything for presentation.
    pub fn to_line(&self, surcharge: Option<Decimal>) -> JurisdictionTaxLine {
        JurisdictionTaxLine {
            jurisdiction_code: self.jurisdiction.code,
            miles_driven: round_whole_u64(*self.miles),
            gallons_purchased: round_2dp(*self.gallons_purchased),
            fuel_consumed: round_2dp(*self.fuel_consumed),
            tax_rate: self.rate(),
            tax_owed: round_2dp(*self.tax_owed),
            tax_paid: round_2dp(*self.tax_paid),
            net_tax: round_2dp(self.net_tax()),
            surcharge: surcharge.map(round_2dp),
        }
    }
}

/// Fuel consumed in the jurisdiction is estimated from its miles and the
/// fleet efficiency. Tax owed is on that fuel. Tax paid is on the fuel
/// actually bought there.
///
/// None if the code isn't in the reference table.
pub fn calc_jurisdiction_tax(
    code: &str,
    miles: GreaterEqualZeroDecimal,
    gallons_purchased: GreaterEqualZeroDecimal,
    efficiency: Decimal,
) -> Option<JurisdictionTax> {
    let jurisdiction = match jurisdiction_info(code) {
        Some(j) => j,
        None => {
            debug!("calc_jurisdiction_tax: {code:?} is not a known jurisdiction");
            return None;
        },
    };
    let rate = GreaterEqualZeroDecimal::coerce(jurisdiction.fuel_tax_rate_per_gallon);

    let fuel_consumed = match PosDecimal::try_from(efficiency) {
        Ok(eff) => miles.div(eff),
        Err(_) => GreaterEqualZeroDecimal::zero(),
    };

    Some(JurisdictionTax {
        jurisdiction,
        miles,
        gallons_purchased,
        fuel_consumed,
        tax_owed: fuel_consumed * rate,
        tax_paid: gallons_purchased * rate,
    })
}

/// A rounded line, without any surcharge. Negative inputs are treated as zero.
pub fn compute_line(
    code: &str,
    miles_driven: Decimal,
    gallons_purchased: Decimal,
    efficiency: Decimal,
) -> Option<JurisdictionTaxLine> {
    calc_jurisdiction_tax(
        code,
        GreaterEqualZeroDecimal::coerce(miles_driven),
        GreaterEqualZeroDecimal::coerce(gallons_purchased),
        efficiency,
    )
    .map(|t| t.to_line(None))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::{fueltax::model::report::JurisdictionTaxLine, gezdec};

    use super::{calc_jurisdiction_tax, compute_line};

    #[test]
    fn test_compute_line() {
        // CO is $0.325/gal
        let line = compute_line("CO", dec!(500), dec!(100), dec!(8)).unwrap();
        assert_eq!(line, JurisdictionTaxLine {
            jurisdiction_code: "CO",
            miles_driven: 500,
            gallons_purchased: dec!(100.00),
            fuel_consumed: dec!(62.50),
            tax_rate: dec!(0.325),
            tax_owed: dec!(20.31),
            tax_paid: dec!(32.50),
            net_tax: dec!(-12.19),
            surcharge: None,
        });
    }

    #[test]
    fn test_net_tax_positive_when_no_fuel_bought() {
        // KS is $0.26/gal
        let line = compute_line("KS", dec!(300), dec!(0), dec!(8)).unwrap();
        assert_eq!(line.fuel_consumed, dec!(37.5));
        assert_eq!(line.tax_owed, dec!(9.75));
        assert_eq!(line.gallons_purchased, dec!(0));
        assert_eq!(line.net_tax, line.tax_owed);
    }

    #[test]
    fn test_net_tax_negative_on_overpurchase() {
        let line = compute_line("TX", dec!(100), dec!(200), dec!(6.5)).unwrap();
        assert!(line.net_tax < dec!(0));
        assert_eq!(line.tax_paid, dec!(40));
    }

    #[test]
    fn test_zero_efficiency() {
        let line = compute_line("CO", dec!(500), dec!(10), dec!(0)).unwrap();
        assert_eq!(line.fuel_consumed, dec!(0));
        assert_eq!(line.tax_owed, dec!(0));
        assert_eq!(line.net_tax, dec!(-3.25));

        let line = compute_line("CO", dec!(500), dec!(10), dec!(-3)).unwrap();
        assert_eq!(line.fuel_consumed, dec!(0));
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(compute_line("ZZ", dec!(500), dec!(100), dec!(8)), None);
        assert_eq!(compute_line("", dec!(500), dec!(100), dec!(8)), None);
    }

    #[test]
    fn test_negative_inputs_coerced() {
        let line = compute_line("CO", dec!(-500), dec!(-100), dec!(8)).unwrap();
        assert_eq!(line.miles_driven, 0);
        assert_eq!(line.gallons_purchased, dec!(0));
        assert_eq!(line.net_tax, dec!(0));
    }

    #[test]
    fn test_full_precision_kept() {
        // 100 / 6.5 = 15.384615...
        let t = calc_jurisdiction_tax("CO", gezdec!(100), gezdec!(0), dec!(6.5)).unwrap();
        assert!(*t.fuel_consumed > dec!(15.3846));
        assert!(*t.fuel_consumed < dec!(15.3847));
        assert_eq!(t.to_line(None).fuel_consumed, dec!(15.38));
        assert_eq!(t.to_line(Some(dec!(1.005))).surcharge, Some(dec!(1.01)));
    }
}
