use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, info};

use crate::util::decimal::{
    is_positive, round_2dp, round_whole_u64, GreaterEqualZeroDecimal,
};

use super::{
    aggregate::{aggregate_fuel, aggregate_miles, resolve_receipt_jurisdiction},
    bookkeeping::{
        calc_jurisdiction_tax, estimate_efficiency, measured_efficiency, SurchargeRule,
    },
    model::{
        jurisdiction::{fuel_tax_rate, JurisdictionCode},
        period::{classify_period, Period},
        records::{FuelPurchaseRecord, TripRecord},
        report::{JurisdictionTaxLine, QuarterlyTaxReport},
    },
    resolver::{JurisdictionResolver, TextHeuristicResolver},
};

/// A typical heavy-truck fuel economy, in miles per gallon.
pub const DEFAULT_FLEET_EFFICIENCY: Decimal = dec!(6.5);

#[derive(Debug)]
pub struct ReportOptions {
    /// MPG to use when the period has no usable fuel purchase data.
    pub default_efficiency: Decimal,
    /// None disables surcharges entirely.
    pub surcharge_rule: Option<SurchargeRule>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            default_efficiency: DEFAULT_FLEET_EFFICIENCY,
            surcharge_rule: Some(SurchargeRule::default()),
        }
    }
}

pub fn build_quarterly_report(
    trips: &[TripRecord],
    receipts: &[FuelPurchaseRecord],
    period: Period,
    options: &ReportOptions,
) -> QuarterlyTaxReport {
    build_quarterly_report_with_resolver(
        trips, receipts, period, options, &TextHeuristicResolver)
}

/// Builds the IFTA report for one quarter out of the full trip and fuel
/// record sets. Records outside the period are ignored.
///
/// This never fails. Records with unknown locations are left out (and
/// counted), and negative numbers are treated as zero.
pub fn build_quarterly_report_with_resolver(
    trips: &[TripRecord],
    receipts: &[FuelPurchaseRecord],
    period: Period,
    options: &ReportOptions,
    resolver: &dyn JurisdictionResolver,
) -> QuarterlyTaxReport {
    let period_trips: Vec<&TripRecord> = trips.iter()
        .filter(|t| classify_period(t.date) == period)
        .collect();
    let period_receipts: Vec<&FuelPurchaseRecord> = receipts.iter()
        .filter(|r| classify_period(r.purchase_date) == period)
        .collect();
    debug!("build_quarterly_report: {period}: {} of {} trips, {} of {} receipts",
           period_trips.len(), trips.len(), period_receipts.len(), receipts.len());

    let mileage = aggregate_miles(period_trips.iter().copied(), resolver);
    let fuel = aggregate_fuel(period_receipts.iter().copied(), resolver);

    // These include records we could not place in a jurisdiction.
    let total_miles: GreaterEqualZeroDecimal =
        period_trips.iter().map(|t| t.miles()).sum();
    let total_gallons: GreaterEqualZeroDecimal =
        period_receipts.iter().map(|r| r.gallons()).sum();
    let total_amount_paid: GreaterEqualZeroDecimal =
        period_receipts.iter().map(|r| r.amount_paid()).sum();

    let efficiency = estimate_efficiency(
        *total_miles, *total_gallons, options.default_efficiency);
    let used_default_efficiency =
        measured_efficiency(*total_miles, *total_gallons).is_none();

    // Mileage jurisdictions first, then any we only bought fuel in.
    let mut codes: Vec<JurisdictionCode> = mileage.codes().to_vec();
    for code in fuel.codes() {
        if mileage.get(code).is_none() {
            codes.push(code);
        }
    }

    let mut lines = Vec::<JurisdictionTaxLine>::with_capacity(codes.len());
    let mut total_tax_owed = Decimal::ZERO;
    let mut total_fuel_consumed = Decimal::ZERO;
    let mut total_surcharge: Option<Decimal> = None;

    for code in codes {
        let miles = mileage.get(code)
            .map(|b| b.miles)
            .unwrap_or(GreaterEqualZeroDecimal::zero());
        let gallons = fuel.get(code)
            .map(|b| b.gallons)
            .unwrap_or(GreaterEqualZeroDecimal::zero());

        if !is_positive(&miles) && !is_positive(&gallons) {
            debug!("build_quarterly_report: skipping {code}, no activity");
            continue;
        }

        let tax = match calc_jurisdiction_tax(code, miles, gallons, efficiency) {
            Some(t) => t,
            None => continue,
        };
        let surcharge = options.surcharge_rule
            .and_then(|rule| rule.compute(code, miles));

        total_tax_owed = total_tax_owed.saturating_add(*tax.tax_owed);
        total_fuel_consumed = total_fuel_consumed.saturating_add(*tax.fuel_consumed);
        if let Some(s) = surcharge {
            total_surcharge = Some(total_surcharge.unwrap_or(Decimal::ZERO).saturating_add(s));
        }

        lines.push(tax.to_line(surcharge));
    }

    // Stable, so ties keep their aggregation order.
    lines.sort_by(|a, b| b.miles_driven.cmp(&a.miles_driven));

    // Fuel tax paid at the pump is taken from every period receipt, rather
    // than from the lines.
    let total_tax_paid: GreaterEqualZeroDecimal = period_receipts.iter()
        .filter_map(|r| {
            let code = resolve_receipt_jurisdiction(r, resolver)?;
            let rate = fuel_tax_rate(code)?;
            Some(r.gallons() * GreaterEqualZeroDecimal::coerce(rate))
        })
        .sum();
    let total_tax_paid = *total_tax_paid;

    // Both sides are non-negative, so this can't overflow.
    let net_amount_due = total_tax_owed - total_tax_paid;
    // Taken before rounding, so a sub-cent surcharge still counts.
    let has_surcharge_jurisdiction_miles =
        total_surcharge.map(|s| is_positive(&s)).unwrap_or(false);
    let total_surcharge = total_surcharge.map(round_2dp);

    info!("build_quarterly_report: {period}: {} jurisdictions, {:.2} MPG, net due {}",
          lines.len(), efficiency, round_2dp(net_amount_due));

    QuarterlyTaxReport {
        period,
        total_miles: round_whole_u64(*total_miles),
        total_gallons_purchased: round_2dp(*total_gallons),
        total_amount_paid: round_2dp(*total_amount_paid),
        total_fuel_consumed: round_2dp(total_fuel_consumed),
        average_efficiency: round_2dp(efficiency),
        used_default_efficiency,
        total_tax_owed: round_2dp(total_tax_owed),
        total_tax_paid: round_2dp(total_tax_paid),
        breakdown: lines,
        net_amount_due: round_2dp(net_amount_due),
        total_surcharge,
        has_surcharge_jurisdiction_miles,
        unresolved_trip_count: mileage.dropped_count,
        unresolved_receipt_count: fuel.dropped_count,
    }
}
