//! Command-line interface components.

use crate::constants::DEFAULT_OUT_DIRECTORY;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "drivenote-converter")]
#[command(about = "Convert a Tank-Datenbank XML export to Drivenote-compatible CSV files")]
#[command(
    long_about = "Convert a Tank-Datenbank XML export to Drivenote-compatible CSV files, one \
                  file per vehicle. Refueling dates are computed in the local timezone of this \
                  machine."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Tank-Datenbank XML export
    #[arg(short, long, value_name = "PATH", value_parser = existing_file)]
    pub in_file: PathBuf,

    /// Directory to save the converted exports in
    #[arg(
        short,
        long,
        value_name = "PATH",
        default_value = DEFAULT_OUT_DIRECTORY,
        value_parser = existing_directory
    )]
    pub out_directory: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn existing_file(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("file '{value}' does not exist"))
    }
}

fn existing_directory(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(format!(
            "directory '{value}' does not exist or is not a directory"
        ))
    }
}
