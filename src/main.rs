use anyhow::Context;
use clap::Parser;
use colored::*;
use drivenote_converter::cli::Args;
use drivenote_converter::logging::setup_logging;
use drivenote_converter::{ConversionStats, Converter};
use std::process;
use tracing::error;

fn main() {
    // Argument errors are reported by clap, before logging is set up
    let args = Args::parse();

    if let Err(e) = setup_logging(args.verbose) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }

    match run(args) {
        Ok(stats) => {
            print_summary(&stats);
            process::exit(0);
        }
        Err(error) => {
            error!("{:#}", error);
            process::exit(1);
        }
    }
}

fn run(args: Args) -> anyhow::Result<ConversionStats> {
    let converter = Converter::new(args.in_file, args.out_directory);
    converter.run().with_context(|| {
        format!(
            "Failed to convert Tank-Datenbank export '{}'",
            converter.in_file().display()
        )
    })
}

fn print_summary(stats: &ConversionStats) {
    println!(
        "{} Converted {} refuelings of {} vehicles in {} ms",
        "✓".bright_green().bold(),
        stats.refuelings_converted.to_string().bright_cyan(),
        stats.vehicles_processed.to_string().bright_cyan(),
        stats.processing_time_ms
    );
    for path in &stats.files_written {
        println!("  {}", path.display().to_string().bright_white());
    }
}
