//! Field-level validation of raw request JSON against the physical
//! bounds table. Fail-fast: the first offending field is reported.

use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::models::{PlanetObservation, PlanetType, SpectralType};

/// Inclusive physical ranges for the float fields, in request order.
pub const NUMERIC_RANGES: [(&str, f64, f64); 5] = [
    ("pl_orbper", 0.1, 100000.0),
    ("pl_orbsmax", 0.001, 1000.0),
    ("pl_bmasse", 0.01, 13000.0),
    ("st_met", -3.0, 1.0),
    ("st_logg", 0.0, 6.0),
];

pub const DISC_YEAR_MIN: i64 = 1990;
pub const DISC_YEAR_MAX: i64 = 2030;

const PL_TYPE_VALUES: &str = "rocky, super_earth, neptune, jupiter";

/// Validate a raw JSON object into a typed observation.
///
/// `planet_name` is optional and defaults to "Unknown". All other
/// fields are required. Pure function of its input.
pub fn validate(raw: &Value) -> Result<PlanetObservation, ApiError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| ApiError::bad_request("request body must be a JSON object"))?;

    let planet_name = obj
        .get("planet_name")
        .and_then(Value::as_str)
        .unwrap_or("Unknown")
        .to_string();

    let mut nums = [0.0_f64; NUMERIC_RANGES.len()];
    for (slot, &(field, lo, hi)) in nums.iter_mut().zip(NUMERIC_RANGES.iter()) {
        *slot = require_float(obj, field, lo, hi)?;
    }

    let disc_year = require_int(obj, "disc_year")?;
    if !(DISC_YEAR_MIN..=DISC_YEAR_MAX).contains(&disc_year) {
        return Err(ApiError::validation(
            "disc_year",
            format!("disc_year must be between {DISC_YEAR_MIN} and {DISC_YEAR_MAX}"),
        ));
    }

    // Unknown spectral classes are legal and bucket into Other.
    let st_type = SpectralType::parse(require_str(obj, "st_type")?);

    let pl_type = PlanetType::parse(require_str(obj, "pl_type")?).ok_or_else(|| {
        ApiError::validation("pl_type", format!("pl_type must be one of {PL_TYPE_VALUES}"))
    })?;

    Ok(PlanetObservation {
        planet_name,
        pl_orbper: nums[0],
        pl_orbsmax: nums[1],
        pl_bmasse: nums[2],
        st_met: nums[3],
        st_logg: nums[4],
        disc_year,
        st_type,
        pl_type,
    })
}

fn missing(field: &str) -> ApiError {
    ApiError::validation(field, format!("missing required field: {field}"))
}

fn require_float(obj: &Map<String, Value>, field: &str, lo: f64, hi: f64) -> Result<f64, ApiError> {
    let value = match obj.get(field) {
        None | Some(Value::Null) => return Err(missing(field)),
        Some(v) => v
            .as_f64()
            .ok_or_else(|| ApiError::validation(field, format!("{field} must be a number")))?,
    };
    if !(lo..=hi).contains(&value) {
        return Err(ApiError::validation(
            field,
            format!("{field} must be between {lo:?} and {hi:?}"),
        ));
    }
    Ok(value)
}

fn require_int(obj: &Map<String, Value>, field: &str) -> Result<i64, ApiError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(missing(field)),
        Some(v) => v
            .as_i64()
            .ok_or_else(|| ApiError::validation(field, format!("{field} must be an integer"))),
    }
}

fn require_str<'a>(obj: &'a Map<String, Value>, field: &str) -> Result<&'a str, ApiError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(missing(field)),
        Some(v) => v
            .as_str()
            .ok_or_else(|| ApiError::validation(field, format!("{field} must be a string"))),
    }
}
