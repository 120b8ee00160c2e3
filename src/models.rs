//! Records read from the Tank-Datenbank export and rows written for Drivenote.

use std::path::PathBuf;

/// A vehicle together with the Drivenote rows built from its refuelings
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub name: String,
    pub rows: Vec<OutputRow>,
}

/// Raw field values of one `<refueling>` element, exactly as found in the export
#[derive(Debug, Clone, PartialEq)]
pub struct Refueling {
    /// Milliseconds since the Unix epoch
    pub timestamp: String,
    pub mileage: String,
    pub price: String,
    pub consumption: String,
    /// `isPartial` value, or the default flag if the element is absent
    pub partial: String,
}

/// One line of a Drivenote refueling import file
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    /// `DD.MM.YYYY`
    pub date: String,
    pub mileage: String,
    pub price: String,
    pub consumption: String,
    pub partial: String,
}

impl OutputRow {
    /// Fields in header order
    pub fn record(&self) -> [&str; 5] {
        [
            self.date.as_str(),
            self.mileage.as_str(),
            self.price.as_str(),
            self.consumption.as_str(),
            self.partial.as_str(),
        ]
    }
}

/// Conversion statistics
#[derive(Debug, Default)]
pub struct ConversionStats {
    pub vehicles_processed: usize,
    pub refuelings_converted: usize,
    pub files_written: Vec<PathBuf>,
    pub processing_time_ms: u128,
}
