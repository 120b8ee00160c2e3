//! Drivenote CSV output.
//!
//! Files are created (or truncated) in place; there is no temp-file swap, so
//! a crash while writing can leave a partial file behind.

use crate::constants::{
    CSV_DELIMITER, CSV_HEADER, CSV_TERMINATOR, FILE_NAME_REPLACED_CHARS, FILE_NAME_REPLACEMENT,
    OUTPUT_FILE_EXTENSION, OUTPUT_FILE_PREFIX,
};
use crate::error::{ConverterError, Result};
use crate::models::OutputRow;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name for a vehicle, e.g. `My Car` -> `Drivenote_Refuelings_My_Car.csv`.
///
/// Spaces and path separators in the name become `_`, so the file always
/// lands directly in the output directory.
pub fn output_file_name(vehicle_name: &str) -> String {
    format!(
        "{OUTPUT_FILE_PREFIX}{}{OUTPUT_FILE_EXTENSION}",
        vehicle_name.replace(FILE_NAME_REPLACED_CHARS, FILE_NAME_REPLACEMENT)
    )
}

/// Write the header and `rows` to the vehicle's file in `out_directory`
pub fn write_vehicle_file(
    vehicle_name: &str,
    rows: &[OutputRow],
    out_directory: &Path,
) -> Result<PathBuf> {
    let path = out_directory.join(output_file_name(vehicle_name));
    let file = File::create(&path).map_err(|e| ConverterError::io(&path, e))?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(CSV_DELIMITER)
        .terminator(csv::Terminator::Any(CSV_TERMINATOR))
        .from_writer(BufWriter::new(file));

    writer
        .write_record(CSV_HEADER)
        .map_err(|e| ConverterError::csv(&path, e))?;
    for row in rows {
        writer
            .write_record(row.record())
            .map_err(|e| ConverterError::csv(&path, e))?;
    }
    writer.flush().map_err(|e| ConverterError::io(&path, e))?;

    debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(path)
}
