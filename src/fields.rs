//! Field extraction and conversion for vehicle and refueling elements.
//!
//! Required fields must occur exactly once below their element; anything else
//! is reported instead of guessed. Numeric values are checked but written
//! through verbatim so the source precision survives the conversion.

use crate::constants::{
    DATE_FORMAT, DEFAULT_PARTIAL_FLAG, TAG_CONSUMPTION, TAG_MILEAGE, TAG_PARTIAL, TAG_PRICE,
    TAG_TIMESTAMP,
};
use crate::error::{ConverterError, Result};
use crate::models::{OutputRow, Refueling};
use crate::xml::Element;
use chrono::TimeZone;
use std::fmt::Display;
use tracing::debug;

/// Text of the single `field` child of `node`
pub fn required_field<'a>(node: &'a Element, field: &str) -> Result<&'a str> {
    let mut matches = node.children(field);
    match (matches.next(), matches.next()) {
        (Some(only), None) => Ok(only.text.as_str()),
        (None, _) => Err(ConverterError::field_count(field, &node.name, 0)),
        (Some(_), Some(_)) => Err(ConverterError::field_count(
            field,
            &node.name,
            node.children(field).count(),
        )),
    }
}

/// Text of the first `field` child of `node`, or the default partial flag
/// if there is none. Further matches are ignored.
pub fn optional_flag(node: &Element, field: &str) -> String {
    node.children(field)
        .next()
        .map_or(DEFAULT_PARTIAL_FLAG, |flag| flag.text.as_str())
        .to_string()
}

/// Collect the raw values of a `<refueling>` element
pub fn extract_refueling(node: &Element) -> Result<Refueling> {
    Ok(Refueling {
        timestamp: required_field(node, TAG_TIMESTAMP)?.to_string(),
        mileage: required_field(node, TAG_MILEAGE)?.to_string(),
        price: required_field(node, TAG_PRICE)?.to_string(),
        consumption: required_field(node, TAG_CONSUMPTION)?.to_string(),
        partial: optional_flag(node, TAG_PARTIAL),
    })
}

/// Convert epoch milliseconds into a `DD.MM.YYYY` date in `timezone`.
///
/// The calendar day depends on the zone: the binary passes `chrono::Local`,
/// so the same export can yield different dates on machines with different
/// zone settings. Fractional milliseconds are truncated towards the past.
pub fn convert_timestamp<Tz>(raw_millis: &str, timezone: &Tz) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let millis: f64 = raw_millis
        .trim()
        .parse()
        .map_err(|_| ConverterError::invalid_timestamp(raw_millis))?;
    if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
        return Err(ConverterError::invalid_timestamp(raw_millis));
    }

    let datetime = timezone
        .timestamp_millis_opt(millis.floor() as i64)
        .single()
        .ok_or_else(|| ConverterError::invalid_timestamp(raw_millis))?;

    Ok(datetime.format(DATE_FORMAT).to_string())
}

/// Check that `raw` is a finite number and return its trimmed token unchanged
pub fn decimal_field(field: &str, raw: &str) -> Result<String> {
    let token = raw.trim();
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(token.to_string()),
        _ => Err(ConverterError::invalid_number(field, raw)),
    }
}

/// Build the Drivenote row for one `<refueling>` element
pub fn build_output_row<Tz>(node: &Element, timezone: &Tz) -> Result<OutputRow>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let refueling = extract_refueling(node)?;

    let row = OutputRow {
        date: convert_timestamp(&refueling.timestamp, timezone)?,
        mileage: decimal_field(TAG_MILEAGE, &refueling.mileage)?,
        price: decimal_field(TAG_PRICE, &refueling.price)?,
        consumption: decimal_field(TAG_CONSUMPTION, &refueling.consumption)?,
        partial: refueling.partial,
    };

    debug!("Converted refueling {:?}", row);
    Ok(row)
}
