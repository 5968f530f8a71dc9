//! Parse options and result shapes

use serde::{Deserialize, Serialize};

/// Target unit used when none is configured
pub const DEFAULT_TARGET: &str = "ms";

/// Per-call parse configuration.
///
/// Deserializes from `{ "target", "ignoreError", "returnData" }` with every
/// field optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Unit name or alias the result is expressed in. Empty means the default.
    pub target: String,
    /// Skip tokens with an unknown unit instead of failing
    pub ignore_error: bool,
    /// Return the total together with every matched range
    pub return_data: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            ignore_error: true,
            return_data: false,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn with_ignore_error(mut self, ignore_error: bool) -> Self {
        self.ignore_error = ignore_error;
        self
    }

    pub fn with_return_data(mut self, return_data: bool) -> Self {
        self.return_data = return_data;
        self
    }

    /// Configured target, falling back to the default when left empty
    pub fn target_or_default(&self) -> &str {
        if self.target.is_empty() {
            DEFAULT_TARGET
        } else {
            &self.target
        }
    }
}

/// One resolved token and its contribution to the total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Range {
    /// Matched text, e.g. "30m" or "2.5 days"
    pub string: String,
    /// Amount converted into the target unit
    pub time: f64,
    /// Char offset of the match start
    pub start: usize,
    /// Char offset one past the match end
    pub end: usize,
}

/// Structured parse output
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParseResult {
    /// Sum of all range times, added left to right
    pub time: f64,
    pub ranges: Vec<Range>,
}

/// Output of a parse call: a bare total, or the total with its ranges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Parsed {
    Time(f64),
    Data(ParseResult),
}

impl Parsed {
    /// Total duration, whichever shape was returned
    pub fn time(&self) -> f64 {
        match self {
            Parsed::Time(time) => *time,
            Parsed::Data(result) => result.time,
        }
    }

    pub fn into_data(self) -> Option<ParseResult> {
        match self {
            Parsed::Data(result) => Some(result),
            Parsed::Time(_) => None,
        }
    }
}
