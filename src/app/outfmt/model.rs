use crate::fueltax::{render::{RenderTable, ReportTables}, QuarterlyTaxReport};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OutputType {
    Summary,
    Breakdown,
    Jurisdictions,
}

pub type Error = String;

pub trait IftaWriter {
    fn print_render_table(
        &mut self,
        out_type: OutputType,
        name: &str,
        table_model: &RenderTable,
    ) -> Result<(), Error>;

    /// Writes a whole report. By default, as its rendered tables.
    fn write_report(
        &mut self,
        report: &QuarterlyTaxReport,
        tables: &ReportTables,
    ) -> Result<(), Error> {
        let name = report.period.to_string();
        self.print_render_table(OutputType::Summary, &name, &tables.summary)
            .map_err(|e| format!("Rendering summary: {e}"))?;
        self.print_render_table(OutputType::Breakdown, &name, &tables.breakdown)
            .map_err(|e| format!("Rendering jurisdiction breakdown: {e}"))
    }

    fn finish(self: Box<Self>) -> Result<(), Error> {
        Ok(())
    }
}
