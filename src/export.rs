use std::path::{Path, PathBuf};

use chrono::Local;

use crate::config::OutputConfig;
use crate::models::{ContactRecord, Result};

pub struct ContactExporter {
    output: OutputConfig,
}

impl ContactExporter {
    pub fn new(output: OutputConfig) -> Self {
        Self { output }
    }

    /// Writes the accumulated records under the output directory,
    /// creating it on demand. Returns the path written.
    pub fn export_to_csv(&self, records: &[ContactRecord]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output.directory)?;
        let path = Path::new(&self.output.directory).join(self.filename());
        write_records(&path, records)?;
        Ok(path)
    }

    fn filename(&self) -> String {
        match &self.output.filename {
            Some(name) => name.clone(),
            None => format!("contacts_{}.csv", Local::now().format("%Y%m%d_%H%M%S")),
        }
    }
}

/// One row per record; phones are comma-joined inside their field, which
/// the CSV writer quotes as needed.
fn write_records(path: &Path, records: &[ContactRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["address", "phones", "email", "website"])?;

    for record in records {
        writer.write_record([
            record.address.as_str(),
            record.phones.join(",").as_str(),
            record.email.as_deref().unwrap_or(""),
            record.website.as_deref().unwrap_or(""),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
