use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use super::{ReportError, ResultTable};

/// Report file path for a base name: `<base_name>.csv`.
pub fn report_path(base_name: &str) -> PathBuf {
    PathBuf::from(format!("{}.csv", base_name))
}

/// Write the table as CSV to any writer.
///
/// Fields containing commas, quotes or newlines are quoted.
pub fn write_csv_to<W: Write>(table: &ResultTable, writer: W) -> Result<(), ReportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in table.rows() {
        csv.write_record(row)?;
    }
    csv.flush()?;
    Ok(())
}

/// Write the table to `<base_name>.csv`, replacing any existing file.
pub fn write_csv(table: &ResultTable, base_name: &str) -> Result<PathBuf, ReportError> {
    let path = report_path(base_name);
    write_csv_file(table, &path)?;
    info!(path = %path.display(), rows = table.len(), "Report written");
    Ok(path)
}

fn write_csv_file(table: &ResultTable, path: &Path) -> Result<(), ReportError> {
    let file = File::create(path).map_err(|source| ReportError::Create {
        path: path.display().to_string(),
        source,
    })?;
    write_csv_to(table, file)
}
