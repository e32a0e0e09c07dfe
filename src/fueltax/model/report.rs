use rust_decimal::Decimal;
use serde::Serialize;

use super::{jurisdiction::JurisdictionCode, period::Period};

/// One jurisdiction's row in a quarterly report. All money and gallon
/// values are rounded to 2 decimal places.
#[derive(PartialEq, Eq, Clone, Debug, Serialize)]
pub struct JurisdictionTaxLine {
    pub jurisdiction_code: JurisdictionCode,
    pub miles_driven: u64,
    pub gallons_purchased: Decimal,
    pub fuel_consumed: Decimal,
    pub tax_rate: Decimal,
    pub tax_owed: Decimal,
    /// Tax already paid at the pump (gallons purchased x rate).
    pub tax_paid: Decimal,
    /// tax_owed - tax_paid. Negative is a credit.
    pub net_tax: Decimal,
    /// Weight-distance tax. Separate from, and never included in, net_tax.
    pub surcharge: Option<Decimal>,
}

#[derive(PartialEq, Eq, Clone, Debug, Serialize)]
pub struct QuarterlyTaxReport {
    pub period: Period,
    pub total_miles: u64,
    pub total_gallons_purchased: Decimal,
    pub total_amount_paid: Decimal,
    pub total_fuel_consumed: Decimal,
    pub average_efficiency: Decimal,
    /// True when there wasn't enough data to estimate efficiency, and the
    /// configured default was used.
    pub used_default_efficiency: bool,
    pub total_tax_owed: Decimal,
    pub total_tax_paid: Decimal,
    /// Sorted by miles driven, descending.
    pub breakdown: Vec<JurisdictionTaxLine>,
    /// Positive is owed, negative is a refund.
    pub net_amount_due: Decimal,
    pub total_surcharge: Option<Decimal>,
    pub has_surcharge_jurisdiction_miles: bool,

    // Period records dropped because their location could not be resolved.
    pub unresolved_trip_count: usize,
    pub unresolved_receipt_count: usize,
}

impl QuarterlyTaxReport {
    pub fn quarter(&self) -> u8 {
        self.period.quarter()
    }

    pub fn year(&self) -> i32 {
        self.period.year()
    }

    pub fn is_refund(&self) -> bool {
        self.net_amount_due < Decimal::ZERO
    }

    pub fn line(&self, code: &str) -> Option<&JurisdictionTaxLine> {
        self.breakdown.iter().find(|l| l.jurisdiction_code == code)
    }
}
