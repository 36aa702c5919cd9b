//! Result record module
//!
//! This module provides [`ResultRecord`], one validated benchmark measurement,
//! and the coercions that turn untrusted input into it.
//!
//! Construction is atomic: every field is checked, every violation is
//! collected, and a record is returned only when all fields are valid.
//!
//! # Coercion rules
//!
//! - `Test` is taken as text unchanged.
//! - `Avg` accepts numbers or text. Text is trimmed and parsed as `f64`.
//!   The value must be finite and strictly greater than zero, so `-0.0`,
//!   `inf` and `nan` are all rejected.
//! - `Unit` accepts a [`DurationUnit`] or text matching a token exactly.

use crate::unit::DurationUnit;
use crate::validation::{Field, FieldViolation, ValidationError, ViolationKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Raw average duration as it arrives from a caller
#[derive(Debug, Clone, PartialEq)]
pub enum AvgInput {
    /// Already numeric
    Number(f64),
    /// Text to be parsed
    Text(String),
}

impl From<f64> for AvgInput {
    fn from(value: f64) -> Self {
        AvgInput::Number(value)
    }
}

impl From<f32> for AvgInput {
    fn from(value: f32) -> Self {
        AvgInput::Number(f64::from(value))
    }
}

impl From<i32> for AvgInput {
    fn from(value: i32) -> Self {
        AvgInput::Number(f64::from(value))
    }
}

impl From<u32> for AvgInput {
    fn from(value: u32) -> Self {
        AvgInput::Number(f64::from(value))
    }
}

impl From<i64> for AvgInput {
    fn from(value: i64) -> Self {
        AvgInput::Number(value as f64)
    }
}

impl From<u64> for AvgInput {
    fn from(value: u64) -> Self {
        AvgInput::Number(value as f64)
    }
}

impl From<&str> for AvgInput {
    fn from(value: &str) -> Self {
        AvgInput::Text(value.to_owned())
    }
}

impl From<String> for AvgInput {
    fn from(value: String) -> Self {
        AvgInput::Text(value)
    }
}

/// Raw duration unit as it arrives from a caller
#[derive(Debug, Clone, PartialEq)]
pub enum UnitInput {
    /// Already typed
    Unit(DurationUnit),
    /// Token to be matched
    Text(String),
}

impl From<DurationUnit> for UnitInput {
    fn from(value: DurationUnit) -> Self {
        UnitInput::Unit(value)
    }
}

impl From<&str> for UnitInput {
    fn from(value: &str) -> Self {
        UnitInput::Text(value.to_owned())
    }
}

impl From<String> for UnitInput {
    fn from(value: String) -> Self {
        UnitInput::Text(value)
    }
}

/// One validated benchmark measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct ResultRecord {
    #[serde(rename = "Test")]
    test: String,
    #[serde(rename = "Avg")]
    avg: f64,
    #[serde(rename = "Unit")]
    unit: DurationUnit,
}

/// Wire shape accepted before validation; absent fields default to null
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Test", default)]
    test: Value,
    #[serde(rename = "Avg", default)]
    avg: Value,
    #[serde(rename = "Unit", default)]
    unit: Value,
}

impl TryFrom<RawRecord> for ResultRecord {
    type Error = ValidationError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        Self::from_fields(Some(&raw.test), Some(&raw.avg), Some(&raw.unit))
    }
}

impl ResultRecord {
    /// Validate raw field values and build a record
    ///
    /// Returns every violation found when any field is invalid.
    ///
    /// ```rust
    /// use bench_result_schema::{DurationUnit, ResultRecord};
    ///
    /// let record = ResultRecord::construct("bench1", "123.456", "sec")?;
    /// assert_eq!(record.avg(), 123.456);
    /// assert_eq!(record.unit(), DurationUnit::Sec);
    ///
    /// assert!(ResultRecord::construct("bench1", "0", "sec").is_err());
    /// # Ok::<(), bench_result_schema::ValidationError>(())
    /// ```
    pub fn construct(
        test: impl Into<String>,
        avg: impl Into<AvgInput>,
        unit: impl Into<UnitInput>,
    ) -> Result<Self, ValidationError> {
        Self::assemble(
            Ok(test.into()),
            validate_avg(avg.into()),
            validate_unit(unit.into()),
        )
    }

    /// Validate a JSON value holding `Test`, `Avg` and `Unit` fields
    ///
    /// Unknown extra fields are ignored.
    pub fn from_json_value(value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(map) => {
                Self::from_fields(map.get("Test"), map.get("Avg"), map.get("Unit"))
            }
            other => Err(FieldViolation::new(
                Field::Record,
                ViolationKind::NotAnObject,
                other.to_string(),
            )
            .into()),
        }
    }

    fn from_fields(
        test: Option<&Value>,
        avg: Option<&Value>,
        unit: Option<&Value>,
    ) -> Result<Self, ValidationError> {
        let test = match present(test) {
            None => Err(missing(Field::Test)),
            Some(Value::String(text)) => Ok(text.clone()),
            Some(other) => Err(FieldViolation::new(
                Field::Test,
                ViolationKind::NotText,
                other.to_string(),
            )),
        };

        let avg = match present(avg) {
            None => Err(missing(Field::Avg)),
            Some(Value::String(text)) => validate_avg(AvgInput::Text(text.clone())),
            Some(Value::Number(number)) => match number.as_f64() {
                Some(value) => validate_avg(AvgInput::Number(value)),
                None => Err(FieldViolation::new(
                    Field::Avg,
                    ViolationKind::NotANumber,
                    number.to_string(),
                )),
            },
            Some(other) => Err(FieldViolation::new(
                Field::Avg,
                ViolationKind::NotANumber,
                other.to_string(),
            )),
        };

        let unit = match present(unit) {
            None => Err(missing(Field::Unit)),
            Some(Value::String(text)) => validate_unit(UnitInput::Text(text.clone())),
            Some(other) => Err(FieldViolation::new(
                Field::Unit,
                ViolationKind::UnknownUnit,
                other.to_string(),
            )),
        };

        Self::assemble(test, avg, unit)
    }

    fn assemble(
        test: Result<String, FieldViolation>,
        avg: Result<f64, FieldViolation>,
        unit: Result<DurationUnit, FieldViolation>,
    ) -> Result<Self, ValidationError> {
        match (test, avg, unit) {
            (Ok(test), Ok(avg), Ok(unit)) => Ok(Self { test, avg, unit }),
            (test, avg, unit) => {
                let violations: Vec<FieldViolation> = [test.err(), avg.err(), unit.err()]
                    .into_iter()
                    .flatten()
                    .collect();
                tracing::trace!(count = violations.len(), "result record rejected");
                Err(ValidationError::from_nonempty(violations))
            }
        }
    }

    /// Benchmark case name
    pub fn test(&self) -> &str {
        &self.test
    }

    /// Average duration, expressed in [`Self::unit`]
    pub fn avg(&self) -> f64 {
        self.avg
    }

    /// Unit of the average duration
    pub fn unit(&self) -> DurationUnit {
        self.unit
    }

    /// Average duration converted to another unit
    pub fn avg_in(&self, unit: DurationUnit) -> f64 {
        self.avg * self.unit.nanos_per_unit() / unit.nanos_per_unit()
    }

    /// Average duration as a [`Duration`], if it fits
    pub fn to_duration(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(self.avg_in(DurationUnit::Sec)).ok()
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn missing(field: Field) -> FieldViolation {
    FieldViolation::new(field, ViolationKind::Missing, "null")
}

fn validate_avg(input: AvgInput) -> Result<f64, FieldViolation> {
    let (value, text) = match input {
        AvgInput::Number(value) => (value, None),
        AvgInput::Text(text) => match text.trim().parse::<f64>() {
            Ok(value) => (value, Some(text)),
            Err(_) => {
                return Err(FieldViolation::new(
                    Field::Avg,
                    ViolationKind::NotANumber,
                    text,
                ))
            }
        },
    };

    // Violations echo the caller's text, not the re-rendered float
    let reject = |kind: ViolationKind| -> Result<f64, FieldViolation> {
        let given = text.clone().unwrap_or_else(|| value.to_string());
        Err(FieldViolation::new(Field::Avg, kind, given))
    };

    if !value.is_finite() {
        return reject(ViolationKind::NotFinite);
    }

    // -0.0 compares equal to 0.0
    if value <= 0.0 {
        return reject(ViolationKind::NotPositive);
    }

    Ok(value)
}

fn validate_unit(input: UnitInput) -> Result<DurationUnit, FieldViolation> {
    match input {
        UnitInput::Unit(unit) => Ok(unit),
        UnitInput::Text(text) => text.parse(),
    }
}
