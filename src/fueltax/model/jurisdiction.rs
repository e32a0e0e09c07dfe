use std::{collections::HashMap, fmt::Display};

use lazy_static::lazy_static;
use rust_decimal::Decimal;
use serde::Serialize;

/// Two-letter jurisdiction code, eg. "CO". Codes handed out by the resolver
/// always point into the reference table.
pub type JurisdictionCode = &'static str;

/// One entry of the IFTA reference table.
#[derive(PartialEq, Eq, Debug, Serialize)]
pub struct JurisdictionInfo {
    pub code: JurisdictionCode,
    pub display_name: &'static str,
    /// Diesel tax, in dollars per gallon.
    pub fuel_tax_rate_per_gallon: Decimal,
}

impl JurisdictionInfo {
    const fn new(
        code: JurisdictionCode,
        display_name: &'static str,
        rate_ten_thousandths: u32,
    ) -> JurisdictionInfo {
        JurisdictionInfo {
            code,
            display_name,
            fuel_tax_rate_per_gallon: Decimal::from_parts(
                rate_ten_thousandths, 0, 0, false, 4),
        }
    }
}

impl Display for JurisdictionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.display_name, self.code)
    }
}

// Diesel rates per gallon for the contiguous US member jurisdictions.
// This is a static reference table, not a live feed. Rates are expressed
// in ten-thousandths of a dollar.
//
// Order matters for name matching in the resolver (first match wins),
// so keep it sorted by code.
pub const JURISDICTIONS: &[JurisdictionInfo] = &[
    JurisdictionInfo::new("AL", "Alabama", 3100),
    JurisdictionInfo::new("AR", "Arkansas", 2850),
    JurisdictionInfo::new("AZ", "Arizona", 2600),
    JurisdictionInfo::new("CA", "California", 9740),
    JurisdictionInfo::new("CO", "Colorado", 3250),
    JurisdictionInfo::new("CT", "Connecticut", 4920),
    JurisdictionInfo::new("DE", "Delaware", 2200),
    JurisdictionInfo::new("FL", "Florida", 3810),
    JurisdictionInfo::new("GA", "Georgia", 3630),
    JurisdictionInfo::new("IA", "Iowa", 3250),
    JurisdictionInfo::new("ID", "Idaho", 3300),
    JurisdictionInfo::new("IL", "Illinois", 7390),
    JurisdictionInfo::new("IN", "Indiana", 5900),
    JurisdictionInfo::new("KS", "Kansas", 2600),
    JurisdictionInfo::new("KY", "Kentucky", 2460),
    JurisdictionInfo::new("LA", "Louisiana", 2000),
    JurisdictionInfo::new("MA", "Massachusetts", 2400),
    JurisdictionInfo::new("MD", "Maryland", 4675),
    JurisdictionInfo::new("ME", "Maine", 3120),
    JurisdictionInfo::new("MI", "Michigan", 3020),
    JurisdictionInfo::new("MN", "Minnesota", 3040),
    JurisdictionInfo::new("MO", "Missouri", 2450),
    JurisdictionInfo::new("MS", "Mississippi", 1800),
    JurisdictionInfo::new("MT", "Montana", 2975),
    JurisdictionInfo::new("NC", "North Carolina", 4050),
    JurisdictionInfo::new("ND", "North Dakota", 2300),
    JurisdictionInfo::new("NE", "Nebraska", 2980),
    JurisdictionInfo::new("NH", "New Hampshire", 2220),
    JurisdictionInfo::new("NJ", "New Jersey", 5190),
    JurisdictionInfo::new("NM", "New Mexico", 2100),
    JurisdictionInfo::new("NV", "Nevada", 2700),
    JurisdictionInfo::new("NY", "New York", 4225),
    JurisdictionInfo::new("OH", "Ohio", 4700),
    JurisdictionInfo::new("OK", "Oklahoma", 1900),
    JurisdictionInfo::new("OR", "Oregon", 3800),
    JurisdictionInfo::new("PA", "Pennsylvania", 7850),
    JurisdictionInfo::new("RI", "Rhode Island", 3800),
    JurisdictionInfo::new("SC", "South Carolina", 2800),
    JurisdictionInfo::new("SD", "South Dakota", 2800),
    JurisdictionInfo::new("TN", "Tennessee", 2700),
    JurisdictionInfo::new("TX", "Texas", 2000),
    JurisdictionInfo::new("UT", "Utah", 3650),
    JurisdictionInfo::new("VA", "Virginia", 4300),
    JurisdictionInfo::new("VT", "Vermont", 3200),
    JurisdictionInfo::new("WA", "Washington", 4940),
    JurisdictionInfo::new("WI", "Wisconsin", 3290),
    JurisdictionInfo::new("WV", "West Virginia", 3570),
    JurisdictionInfo::new("WY", "Wyoming", 2400),
];

lazy_static! {
    static ref JURISDICTIONS_BY_CODE: HashMap<&'static str, &'static JurisdictionInfo> =
        JURISDICTIONS.iter().map(|j| (j.code, j)).collect();
}

/// Looks up a code in the reference table. Codes are matched exactly
/// (they are always upper case).
pub fn jurisdiction_info(code: &str) -> Option<&'static JurisdictionInfo> {
    JURISDICTIONS_BY_CODE.get(code).copied()
}

pub fn fuel_tax_rate(code: &str) -> Option<Decimal> {
    jurisdiction_info(code).map(|j| j.fuel_tax_rate_per_gallon)
}
