//! Duration unit module
//!
//! This module provides the closed set of units a benchmark duration can be
//! expressed in. Parsing is an exact, case-sensitive match on the canonical
//! token; there are no aliases and no numeric codes.

use crate::validation::{Field, FieldViolation, ViolationKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit in which a benchmark duration is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum DurationUnit {
    /// Seconds
    Sec,
    /// Milliseconds
    Ms,
    /// Microseconds
    Us,
    /// Nanoseconds
    Ns,
}

impl DurationUnit {
    /// All units, coarsest first
    pub const ALL: [DurationUnit; 4] = [
        DurationUnit::Sec,
        DurationUnit::Ms,
        DurationUnit::Us,
        DurationUnit::Ns,
    ];

    /// Canonical token of this unit
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DurationUnit::Sec => "sec",
            DurationUnit::Ms => "ms",
            DurationUnit::Us => "us",
            DurationUnit::Ns => "ns",
        }
    }

    /// Number of nanoseconds in one of this unit
    #[must_use]
    pub const fn nanos_per_unit(self) -> f64 {
        match self {
            DurationUnit::Sec => 1e9,
            DurationUnit::Ms => 1e6,
            DurationUnit::Us => 1e3,
            DurationUnit::Ns => 1.0,
        }
    }

    /// Look up a unit by its exact token
    fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|unit| unit.as_str() == token)
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DurationUnit {
    type Err = FieldViolation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s)
            .ok_or_else(|| FieldViolation::new(Field::Unit, ViolationKind::UnknownUnit, s))
    }
}

impl TryFrom<&str> for DurationUnit {
    type Error = FieldViolation;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for DurationUnit {
    type Error = FieldViolation;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DurationUnit> for &'static str {
    fn from(unit: DurationUnit) -> Self {
        unit.as_str()
    }
}
