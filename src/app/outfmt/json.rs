use std::io::Write;

use serde::Serialize;

use crate::{
    fueltax::{render::{RenderTable, ReportTables}, QuarterlyTaxReport},
    util::rw::WriteHandle,
};

use super::model::{Error, IftaWriter, OutputType};

/// Writes the report model itself as JSON (rather than its rendered tables),
/// for other tools to consume. Standalone tables are written as JSON objects.
pub struct JsonWriter {
    w: WriteHandle,
}

impl JsonWriter {
    pub fn new(w: WriteHandle) -> JsonWriter {
        JsonWriter { w }
    }

    fn write_value<T: Serialize>(&mut self, value: &T) -> Result<(), Error> {
        serde_json::to_writer_pretty(&mut self.w, value).map_err(|e| e.to_string())?;
        writeln!(self.w).map_err(|e| e.to_string())
    }
}

#[derive(Serialize)]
struct NamedTable<'a> {
    name: &'a str,
    #[serde(flatten)]
    table: &'a RenderTable,
}

impl IftaWriter for JsonWriter {
    fn print_render_table(
        &mut self,
        out_type: OutputType,
        name: &str,
        table_model: &RenderTable,
    ) -> Result<(), Error> {
        let name = match out_type {
            OutputType::Jurisdictions => "jurisdictions",
            _ => name,
        };
        self.write_value(&NamedTable { name, table: table_model })
    }

    fn write_report(
        &mut self,
        report: &QuarterlyTaxReport,
        _tables: &ReportTables,
    ) -> Result<(), Error> {
        self.write_value(report)
    }
}
