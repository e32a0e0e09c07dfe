use rust_decimal::Decimal;
use serde::Serialize;

use crate::util::decimal::dollar_str;

use super::model::{
    jurisdiction::{jurisdiction_info, JURISDICTIONS},
    report::{JurisdictionTaxLine, QuarterlyTaxReport},
};

/// A presentation-agnostic table. Writers decide how to lay it out.
#[derive(Default, Debug, Serialize)]
pub struct RenderTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub footer: Vec<String>,
    pub notes: Vec<String>,
    pub errors: Vec<String>,
}

pub struct ReportTables {
    pub summary: RenderTable,
    pub breakdown: RenderTable,
}

fn gallons_str(d: &Decimal) -> String {
    format!("{:.2}", d)
}

fn rate_str(d: &Decimal) -> String {
    format!("${:.4}", d)
}

fn opt_dollar_str(d: &Option<Decimal>) -> String {
    d.map(|v| dollar_str(&v)).unwrap_or_default()
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

fn jurisdiction_cell(line: &JurisdictionTaxLine) -> String {
    match jurisdiction_info(line.jurisdiction_code) {
        Some(j) => j.to_string(),
        None => line.jurisdiction_code.to_string(),
    }
}

fn efficiency_note(report: &QuarterlyTaxReport) -> String {
    if report.used_default_efficiency {
        format!(
            "Fleet efficiency: {:.2} MPG (default, since it could not be estimated \
             from this period's mileage and fuel purchases)",
            report.average_efficiency
        )
    } else {
        format!(
            "Fleet efficiency: {:.2} MPG ({} miles / {} gallons purchased)",
            report.average_efficiency,
            report.total_miles,
            gallons_str(&report.total_gallons_purchased)
        )
    }
}

/// The per-jurisdiction table, with a totals footer.
///
/// The surcharge column is only included when some jurisdiction has one.
pub fn render_report_breakdown(report: &QuarterlyTaxReport) -> RenderTable {
    let with_surcharge = report.total_surcharge.is_some();

    let mut header: Vec<String> = vec![
        "Jurisdiction", "Miles", "Fuel Purchased (gal)", "Fuel Used (gal)",
        "Tax Rate", "Tax Owed", "Tax Paid", "Net Tax",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    if with_surcharge {
        header.push("Surcharge".to_string());
    }

    let mut rows = Vec::<Vec<String>>::with_capacity(report.breakdown.len());
    for line in &report.breakdown {
        let mut row = vec![
            jurisdiction_cell(line),
            line.miles_driven.to_string(),
            gallons_str(&line.gallons_purchased),
            gallons_str(&line.fuel_consumed),
            rate_str(&line.tax_rate),
            dollar_str(&line.tax_owed),
            dollar_str(&line.tax_paid),
            dollar_str(&line.net_tax),
        ];
        if with_surcharge {
            row.push(opt_dollar_str(&line.surcharge));
        }
        rows.push(row);
    }

    let mut footer = vec![
        "Total".to_string(),
        report.total_miles.to_string(),
        gallons_str(&report.total_gallons_purchased),
        gallons_str(&report.total_fuel_consumed),
        String::new(),
        dollar_str(&report.total_tax_owed),
        dollar_str(&report.total_tax_paid),
        dollar_str(&report.net_amount_due),
    ];
    if with_surcharge {
        footer.push(opt_dollar_str(&report.total_surcharge));
    }

    let mut notes = vec![efficiency_note(report)];
    notes.push(
        "Each trip's miles are attributed entirely to the jurisdiction it started in \
         (or ended in, if the start is unknown)."
            .to_string(),
    );
    if report.unresolved_trip_count > 0 {
        notes.push(format!(
            "{} with an unrecognized location counted towards total miles only",
            plural(report.unresolved_trip_count, "trip", "trips")
        ));
    }
    if report.unresolved_receipt_count > 0 {
        notes.push(format!(
            "{} with an unrecognized location counted towards total gallons only",
            plural(report.unresolved_receipt_count, "fuel receipt", "fuel receipts")
        ));
    }
    if with_surcharge {
        notes.push(
            "Surcharges are weight-distance taxes, filed separately. They are not \
             included in net tax."
                .to_string(),
        );
    }

    RenderTable { header, rows, footer, notes, errors: Vec::new() }
}

/// A two column (item, value) overview of the report.
pub fn render_report_summary(report: &QuarterlyTaxReport) -> RenderTable {
    let mut rows: Vec<(&str, String)> = vec![
        ("Period", report.period.to_string()),
        ("Dates", report.period.date_range_string()),
        ("Jurisdictions", report.breakdown.len().to_string()),
        ("Total Miles", report.total_miles.to_string()),
        ("Fuel Purchased (gal)", gallons_str(&report.total_gallons_purchased)),
        ("Fuel Cost", dollar_str(&report.total_amount_paid)),
        ("Fleet Efficiency (MPG)", format!("{:.2}", report.average_efficiency)),
        ("Fuel Used (gal)", gallons_str(&report.total_fuel_consumed)),
        ("Tax Owed", dollar_str(&report.total_tax_owed)),
        ("Tax Paid", dollar_str(&report.total_tax_paid)),
    ];
    if report.is_refund() {
        rows.push(("Net Refund", dollar_str(&report.net_amount_due.abs())));
    } else {
        rows.push(("Net Amount Due", dollar_str(&report.net_amount_due)));
    }
    if let Some(surcharge) = &report.total_surcharge {
        rows.push(("Surcharges", dollar_str(surcharge)));
    }

    let mut notes = Vec::new();
    if report.breakdown.is_empty() {
        notes.push(format!("No activity in {}", report.period));
    }

    RenderTable {
        header: vec!["Item".to_string(), "Value".to_string()],
        rows: rows
            .into_iter()
            .map(|(k, v)| vec![k.to_string(), v])
            .collect(),
        footer: Vec::new(),
        notes,
        errors: Vec::new(),
    }
}

pub fn render_report(report: &QuarterlyTaxReport) -> ReportTables {
    ReportTables {
        summary: render_report_summary(report),
        breakdown: render_report_breakdown(report),
    }
}

/// The reference table, for --list-jurisdictions.
pub fn render_jurisdictions_table() -> RenderTable {
    RenderTable {
        header: vec![
            "Code".to_string(),
            "Jurisdiction".to_string(),
            "Fuel Tax ($/gal)".to_string(),
        ],
        rows: JURISDICTIONS
            .iter()
            .map(|j| {
                vec![
                    j.code.to_string(),
                    j.display_name.to_string(),
                    rate_str(&j.fuel_tax_rate_per_gallon),
                ]
            })
            .collect(),
        ..RenderTable::default()
    }
}
