//! Fixed names and formats of the Tank-Datenbank and Drivenote file layouts.

// =============================================================================
// Tank-Datenbank XML layout
// =============================================================================

/// Name of the document root element
pub const ROOT_TAG: &str = "fueldb";

/// Path from the root to the vehicle elements
pub const VEHICLE_PATH: &[&str] = &["vehicles", "vehicle"];

/// Path from a vehicle element to its refueling elements
pub const REFUELING_PATH: &[&str] = &["refuelings", "refueling"];

pub const TAG_NAME: &str = "name";
pub const TAG_TIMESTAMP: &str = "tstamp";
pub const TAG_MILEAGE: &str = "mileage";
pub const TAG_PRICE: &str = "price";
pub const TAG_CONSUMPTION: &str = "consumption";
pub const TAG_PARTIAL: &str = "isPartial";

/// Partial flag written when a refueling carries no `isPartial` element
pub const DEFAULT_PARTIAL_FLAG: &str = "0";

// =============================================================================
// Drivenote CSV layout
// =============================================================================

/// Header record of every output file
pub const CSV_HEADER: [&str; 5] = ["Date", "Mileage", "Price", "Consumption", "Partial"];

pub const CSV_DELIMITER: u8 = b',';

/// Output lines end in a bare `\n`
pub const CSV_TERMINATOR: u8 = b'\n';

/// Output file names are `<prefix><vehicle name><extension>`
pub const OUTPUT_FILE_PREFIX: &str = "Drivenote_Refuelings_";
pub const OUTPUT_FILE_EXTENSION: &str = ".csv";

/// Characters of a vehicle name that are replaced when deriving file names
pub const FILE_NAME_REPLACED_CHARS: &[char] = &[' ', '/', '\\'];

/// Replacement for [`FILE_NAME_REPLACED_CHARS`]
pub const FILE_NAME_REPLACEMENT: &str = "_";

/// chrono format of the `Date` column (e.g. `05.03.2023`)
pub const DATE_FORMAT: &str = "%d.%m.%Y";

// =============================================================================
// CLI defaults
// =============================================================================

pub const DEFAULT_OUT_DIRECTORY: &str = ".";

/// Log level used unless `--verbose` or `RUST_LOG` says otherwise
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const VERBOSE_LOG_LEVEL: &str = "debug";
