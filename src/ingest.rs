//! Batch ingestion module
//!
//! This module validates a stream of candidate result records. Valid records
//! are written to the output as normalised JSON lines; rejected candidates are
//! collected in an [`IngestReport`] together with where they were found.

use crate::config::{AppConfig, InputFormat};
use crate::error::Result;
use crate::record::ResultRecord;
use crate::validation::{Field, FieldViolation, ValidationError, ViolationKind};
use serde_json::Value;
use std::fmt;
use std::io::{BufRead, Write};

/// Where a candidate record came from in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// 0-based index inside a JSON document
    Index(usize),
    /// 1-based line number in JSON Lines input
    Line(usize),
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Index(index) => write!(f, "record {index}"),
            Position::Line(line) => write!(f, "line {line}"),
        }
    }
}

/// A candidate that failed validation
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    /// Location of the candidate
    pub position: Position,
    /// Why it was rejected
    pub error: ValidationError,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.position, self.error)
    }
}

/// Outcome of one ingestion run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    accepted: usize,
    rejected: Vec<Rejection>,
    stopped_early: bool,
}

impl IngestReport {
    /// Number of records written to the output
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Candidates that failed validation, in input order
    pub fn rejected(&self) -> &[Rejection] {
        &self.rejected
    }

    /// Whether fail-fast mode stopped before the end of the input
    pub fn stopped_early(&self) -> bool {
        self.stopped_early
    }

    /// True when every candidate was accepted
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Validates candidate records read from a stream
#[derive(Debug, Clone, Default)]
pub struct Ingestor {
    format: InputFormat,
    fail_fast: bool,
}

impl Ingestor {
    /// Create an ingestor for the given input format
    pub fn new(format: InputFormat) -> Self {
        Self {
            format,
            fail_fast: false,
        }
    }

    /// Create an ingestor from application configuration
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.format()).with_fail_fast(config.fail_fast())
    }

    /// Stop at the first rejected candidate
    #[must_use]
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Validate every candidate from `reader`, writing accepted records to `writer`
    ///
    /// Malformed JSON in [`InputFormat::Json`] aborts with an error, since
    /// no candidate can be located. In [`InputFormat::JsonLines`] a malformed
    /// line is a rejection and processing continues.
    pub fn process<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> Result<IngestReport> {
        let mut report = IngestReport::default();

        match self.format {
            InputFormat::Json => self.process_document(reader, &mut writer, &mut report)?,
            InputFormat::JsonLines => self.process_lines(reader, &mut writer, &mut report)?,
        }

        writer.flush()?;
        tracing::info!(
            accepted = report.accepted,
            rejected = report.rejected.len(),
            stopped_early = report.stopped_early,
            "ingestion finished"
        );
        Ok(report)
    }

    fn process_document<R: BufRead, W: Write>(
        &self,
        mut reader: R,
        writer: &mut W,
        report: &mut IngestReport,
    ) -> Result<()> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        if content.trim().is_empty() {
            return Ok(());
        }

        let candidates = match serde_json::from_str::<Value>(&content)? {
            Value::Array(items) => items,
            single => vec![single],
        };

        for (index, candidate) in candidates.iter().enumerate() {
            let outcome = ResultRecord::from_json_value(candidate);
            if !self.record_outcome(Position::Index(index), outcome, writer, report)? {
                break;
            }
        }
        Ok(())
    }

    fn process_lines<R: BufRead, W: Write>(
        &self,
        reader: R,
        writer: &mut W,
        report: &mut IngestReport,
    ) -> Result<()> {
        // Raw bytes so a line that is not UTF-8 is rejected on its own
        for (index, line) in reader.split(b'\n').enumerate() {
            let line = line?;
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            let outcome = match serde_json::from_slice::<Value>(&line) {
                Ok(candidate) => ResultRecord::from_json_value(&candidate),
                Err(err) => Err(FieldViolation::new(
                    Field::Record,
                    ViolationKind::Malformed,
                    err.to_string(),
                )
                .into()),
            };

            if !self.record_outcome(Position::Line(index + 1), outcome, writer, report)? {
                break;
            }
        }
        Ok(())
    }

    /// Write or collect one outcome; returns whether to keep going
    fn record_outcome<W: Write>(
        &self,
        position: Position,
        outcome: std::result::Result<ResultRecord, ValidationError>,
        writer: &mut W,
        report: &mut IngestReport,
    ) -> Result<bool> {
        match outcome {
            Ok(record) => {
                serde_json::to_writer(&mut *writer, &record)?;
                writer.write_all(b"\n")?;
                report.accepted += 1;
                Ok(true)
            }
            Err(error) => {
                tracing::debug!(%position, %error, "candidate rejected");
                report.rejected.push(Rejection { position, error });
                if self.fail_fast {
                    report.stopped_early = true;
                    return Ok(false);
                }
                Ok(true)
            }
        }
    }
}
