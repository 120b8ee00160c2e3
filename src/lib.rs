//! Tank-Datenbank to Drivenote converter.
//!
//! Converts a Tank-Datenbank XML export into Drivenote-compatible CSV files,
//! one file per vehicle:
//! - Parsing the export into an element tree
//! - Validating that every required field occurs exactly once
//! - Converting epoch-millisecond timestamps into `DD.MM.YYYY` dates
//! - Writing `Drivenote_Refuelings_<vehicle>.csv` files

pub mod cli;
pub mod constants;
pub mod converter;
pub mod error;
pub mod fields;
pub mod logging;
pub mod models;
pub mod writer;
pub mod xml;

pub use converter::Converter;
pub use error::{ConverterError, Result};
pub use models::{ConversionStats, OutputRow, Refueling, Vehicle};
