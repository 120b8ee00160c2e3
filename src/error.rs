//! Error handling for Tank-Datenbank conversion.
//!
//! Every inconsistency found in the export is fatal: the converter stops at
//! the first error and the binary exits with status 1.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConverterError {
    #[error("I/O error on '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error on '{}'", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Tank-Datenbank XML '{}' syntax is invalid: {reason}", path.display())]
    XmlParse { path: PathBuf, reason: String },

    #[error("Tank-Datenbank XML contains a {element} with {count} '{field}'-tags, expected exactly one")]
    FieldCount {
        field: String,
        element: String,
        count: usize,
    },

    #[error("Field '{field}' does not contain a number: '{value}'")]
    InvalidNumber { field: String, value: String },

    #[error("Timestamp '{value}' cannot be converted to a date")]
    InvalidTimestamp { value: String },

    #[error("Vehicle '{name}' cannot be converted")]
    Vehicle {
        name: String,
        #[source]
        source: Box<ConverterError>,
    },
}

impl ConverterError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    pub fn xml_parse(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::XmlParse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn field_count(field: &str, element: &str, count: usize) -> Self {
        Self::FieldCount {
            field: field.to_string(),
            element: element.to_string(),
            count,
        }
    }

    pub fn invalid_number(field: &str, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            field: field.to_string(),
            value: value.into(),
        }
    }

    /// Attach the vehicle being converted to an error from one of its refuelings
    pub fn in_vehicle(self, name: impl Into<String>) -> Self {
        Self::Vehicle {
            name: name.into(),
            source: Box::new(self),
        }
    }

    pub fn invalid_timestamp(value: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConverterError>;
