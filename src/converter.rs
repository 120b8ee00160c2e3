//! Conversion driver.
//!
//! Reads the Tank-Datenbank export, walks `fueldb/vehicles/vehicle` in
//! document order and writes one Drivenote file per vehicle. The first error
//! stops the run; files written for earlier vehicles are left in place.

use crate::constants::{REFUELING_PATH, ROOT_TAG, TAG_NAME, VEHICLE_PATH};
use crate::error::{ConverterError, Result};
use crate::fields::{build_output_row, required_field};
use crate::models::{ConversionStats, Vehicle};
use crate::writer::write_vehicle_file;
use crate::xml::Element;
use chrono::{Local, TimeZone};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Converter for one Tank-Datenbank export
pub struct Converter<Tz: TimeZone = Local> {
    in_file: PathBuf,
    out_directory: PathBuf,
    timezone: Tz,
}

impl Converter<Local> {
    /// Create a converter that renders dates in the system's local timezone
    pub fn new(in_file: PathBuf, out_directory: PathBuf) -> Self {
        Self::with_timezone(in_file, out_directory, Local)
    }
}

impl<Tz> Converter<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    /// Create a converter that renders dates in `timezone`
    pub fn with_timezone(in_file: PathBuf, out_directory: PathBuf, timezone: Tz) -> Self {
        Self {
            in_file,
            out_directory,
            timezone,
        }
    }

    pub fn in_file(&self) -> &Path {
        &self.in_file
    }

    pub fn out_directory(&self) -> &Path {
        &self.out_directory
    }

    /// Convert every vehicle of the export, stopping at the first error
    pub fn run(&self) -> Result<ConversionStats> {
        let start_time = Instant::now();
        let document = self.load_document()?;

        let mut stats = ConversionStats::default();
        for vehicle_node in locate_vehicles(&document) {
            let vehicle = self.convert_vehicle(vehicle_node)?;
            let path = write_vehicle_file(&vehicle.name, &vehicle.rows, &self.out_directory)?;

            stats.vehicles_processed += 1;
            stats.refuelings_converted += vehicle.rows.len();
            stats.files_written.push(path);
        }

        stats.processing_time_ms = start_time.elapsed().as_millis();
        debug!("Conversion finished: {:?}", stats);
        Ok(stats)
    }

    /// Read and parse the export
    pub fn load_document(&self) -> Result<Element> {
        let content = fs::read(&self.in_file).map_err(|e| ConverterError::io(&self.in_file, e))?;
        let document = Element::parse(&content)
            .map_err(|reason| ConverterError::xml_parse(&self.in_file, reason))?;

        info!(
            "Successfully parsed Tank-Datenbank '{}'.",
            self.in_file.display()
        );
        Ok(document)
    }

    /// Build all rows of one `<vehicle>` element without touching the filesystem
    pub fn convert_vehicle(&self, node: &Element) -> Result<Vehicle> {
        let name = required_field(node, TAG_NAME)?.to_string();
        info!("Processing vehicle '{}' ...", name);

        let rows = node
            .path(REFUELING_PATH)
            .into_iter()
            .map(|refueling| build_output_row(refueling, &self.timezone))
            .collect::<Result<Vec<_>>>()
            .map_err(|e| e.in_vehicle(&name))?;

        debug!("Vehicle '{}' has {} refuelings", name, rows.len());
        Ok(Vehicle { name, rows })
    }
}

/// Vehicle elements at `fueldb/vehicles/vehicle`; empty if the root is not `fueldb`
pub fn locate_vehicles(document: &Element) -> Vec<&Element> {
    if document.name != ROOT_TAG {
        debug!(
            "Root element is <{}>, expected <{}>",
            document.name, ROOT_TAG
        );
        return Vec::new();
    }
    document.path(VEHICLE_PATH)
}
