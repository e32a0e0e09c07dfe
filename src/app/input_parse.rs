use std::str::FromStr;

use rust_decimal::Decimal;

use crate::{
    fueltax::{classify_period, Period},
    util::{
        date::{parse_dyn_date_format, today_local, DynDateFormat},
        decimal::{parse_lenient_decimal, PosDecimal},
    },
};

pub type Error = String;

/// An explicit period (eg. 2024Q1), or else the quarter containing today.
pub fn parse_period_or_current(period: Option<&str>) -> Result<Period, Error> {
    match period {
        Some(s) => Period::from_str(s),
        None => Ok(classify_period(today_local())),
    }
}

/// A fleet efficiency in MPG. Must be positive.
pub fn parse_default_efficiency(mpg: &str) -> Result<Decimal, Error> {
    let d = parse_lenient_decimal(mpg)
        .map_err(|e| format!("Invalid MPG '{mpg}': {e}"))?;
    let d = PosDecimal::try_from(d)
        .map_err(|_| format!("MPG must be greater than zero (got {mpg})"))?;
    Ok(*d)
}

pub fn parse_date_format(fmt: &Option<String>) -> Result<Option<DynDateFormat>, Error> {
    match fmt {
        Some(f) => parse_dyn_date_format(f)
            .map(Some)
            .map_err(|e| format!("Invalid date format '{f}': {e}")),
        None => Ok(None),
    }
}
