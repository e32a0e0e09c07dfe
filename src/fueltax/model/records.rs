use rust_decimal::Decimal;
use time::Date;

use crate::util::decimal::GreaterEqualZeroDecimal;

/// A logged trip. Owned by whatever recorded it; the tax engine only reads it.
///
/// Numeric fields are kept as entered. Negative values are treated as zero
/// by the aggregators.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct TripRecord {
    pub date: Date,
    pub miles_driven: Decimal,
    pub start_location: String,
    pub end_location: String,
}

impl TripRecord {
    pub fn new(date: Date, miles_driven: Decimal,
               start_location: &str, end_location: &str) -> TripRecord {
        TripRecord {
            date,
            miles_driven,
            start_location: start_location.to_string(),
            end_location: end_location.to_string(),
        }
    }

    pub fn miles(&self) -> GreaterEqualZeroDecimal {
        GreaterEqualZeroDecimal::coerce(self.miles_driven)
    }
}

/// A fuel receipt.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct FuelPurchaseRecord {
    pub purchase_date: Date,
    pub location: String,
    pub gallons_purchased: Decimal,
    pub total_amount_paid: Decimal,
}

impl FuelPurchaseRecord {
    pub fn new(purchase_date: Date, location: &str,
               gallons_purchased: Decimal, total_amount_paid: Decimal) -> FuelPurchaseRecord {
        FuelPurchaseRecord {
            purchase_date,
            location: location.to_string(),
            gallons_purchased,
            total_amount_paid,
        }
    }

    pub fn gallons(&self) -> GreaterEqualZeroDecimal {
        GreaterEqualZeroDecimal::coerce(self.gallons_purchased)
    }

    pub fn amount_paid(&self) -> GreaterEqualZeroDecimal {
        GreaterEqualZeroDecimal::coerce(self.total_amount_paid)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::util::date::parse_standard_date;

    use super::{FuelPurchaseRecord, TripRecord};

    #[test]
    fn test_negative_values_coerced() {
        let d = parse_standard_date("2024-02-01").unwrap();
        let trip = TripRecord::new(d, dec!(-12), "Denver, CO", "");
        assert_eq!(*trip.miles(), dec!(0));
        // The record itself is left untouched
        assert_eq!(trip.miles_driven, dec!(-12));

        let fuel = FuelPurchaseRecord::new(d, "CO", dec!(-1), dec!(40.5));
        assert_eq!(*fuel.gallons(), dec!(0));
        assert_eq!(*fuel.amount_paid(), dec!(40.5));
    }
}
