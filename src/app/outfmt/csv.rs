use std::{fs::File, io, path::PathBuf};

use crate::{fueltax::render::RenderTable, util::os::mk_writable_dir};

use super::model::{Error, IftaWriter, OutputType};

/// Writes each table to its own csv file in out_dir.
pub struct CsvWriter {
    out_dir: PathBuf,
}

impl CsvWriter {
    pub fn new(out_dir: &str) -> Result<CsvWriter, io::Error> {
        let dir_path = PathBuf::from(out_dir);
        mk_writable_dir(&dir_path)?;
        Ok(CsvWriter { out_dir: dir_path })
    }

    pub fn file_name(out_type: OutputType, name: &str) -> String {
        let slug = name.trim().to_lowercase().replace(" ", "-");
        match out_type {
            OutputType::Summary => format!("summary-{slug}.csv"),
            OutputType::Breakdown => format!("breakdown-{slug}.csv"),
            OutputType::Jurisdictions => "jurisdictions.csv".to_string(),
        }
    }
}

impl IftaWriter for CsvWriter {
    fn print_render_table(
        &mut self,
        out_type: OutputType,
        name: &str,
        table_model: &RenderTable,
    ) -> Result<(), Error> {
        let file_path = self.out_dir.join(CsvWriter::file_name(out_type, name));
        let fp = File::create(&file_path)
            .map_err(|e| format!("Failed to create {}: {}", file_path.display(), e))?;

        let mut csv_w = csv::WriterBuilder::new().has_headers(true).from_writer(fp);

        csv_w.write_record(&table_model.header).map_err(|e| e.to_string())?;
        for row in &table_model.rows {
            csv_w.write_record(row).map_err(|e| e.to_string())?;
        }
        if !table_model.footer.is_empty() {
            csv_w.write_record(&table_model.footer).map_err(|e| e.to_string())?;
        }

        // Notes and errors go in the first column, padded out so the csv
        // stays rectangular.
        let n_cols = table_model.header.len().max(1);
        for line in table_model.errors.iter().chain(table_model.notes.iter()) {
            let mut record = vec![String::new(); n_cols];
            record[0] = line.clone();
            csv_w.write_record(&record).map_err(|e| e.to_string())?;
        }

        csv_w.flush().map_err(|e| e.to_string())?;
        tracing::debug!("CsvWriter: wrote {}", file_path.display());
        Ok(())
    }
}
