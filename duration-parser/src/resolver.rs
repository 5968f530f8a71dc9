//! Resolver - turns tokens into target-unit deltas
//!
//! Each token resolves to exactly one outcome. Only `Fatal` stops a parse;
//! `Skipped` tokens leave no trace in the total or the ranges.

use std::sync::LazyLock;
use duration_units::{UnitDefinition, UnitRegistry};
use crate::{Match, ParseError, Range};

/// Bare numbers fall back to this when the registry has no "second"
static BARE_SECOND: LazyLock<UnitDefinition> = LazyLock::new(UnitDefinition::second);

/// Outcome of resolving a single token
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Converted amount, plus its range when structured output is on
    Resolved { delta: f64, range: Option<Range> },
    /// Unknown unit, dropped because errors are ignored
    Skipped,
    /// Unknown unit or bad amount with errors enabled
    Fatal(ParseError),
}

/// Converts tokens into deltas expressed in a fixed target unit
#[derive(Debug, Clone)]
pub struct Resolver<'r> {
    registry: &'r UnitRegistry,
    target: &'r UnitDefinition,
    bare: &'r UnitDefinition,
    ignore_error: bool,
    return_data: bool,
}

impl<'r> Resolver<'r> {
    pub fn new(registry: &'r UnitRegistry, target: &'r UnitDefinition) -> Self {
        let bare: &'r UnitDefinition = match registry.find("second") {
            Some(second) => second,
            None => &*BARE_SECOND,
        };
        Resolver {
            registry,
            target,
            bare,
            ignore_error: true,
            return_data: false,
        }
    }

    pub fn with_ignore_error(mut self, ignore_error: bool) -> Self {
        self.ignore_error = ignore_error;
        self
    }

    pub fn with_return_data(mut self, return_data: bool) -> Self {
        self.return_data = return_data;
        self
    }

    /// Resolve one token against the registry and convert it into the target unit
    pub fn resolve(&self, token: &Match<'_>) -> Resolution {
        let source = if token.unit.is_empty() {
            self.bare
        } else {
            match self.registry.find(token.unit) {
                Some(unit) => unit,
                None if self.ignore_error => {
                    tracing::debug!(unit = token.unit, start = token.start, "skipping unknown time unit");
                    return Resolution::Skipped;
                }
                None => {
                    return Resolution::Fatal(ParseError::UnknownSourceUnit {
                        unit: token.unit.to_string(),
                        start: token.start,
                        end: token.end,
                    });
                }
            }
        };

        let amount: f64 = match token.amount.parse() {
            Ok(amount) => amount,
            Err(_) => return Resolution::Fatal(ParseError::InvalidAmount(token.amount.to_string())),
        };

        let delta = source.convert_to(amount, self.target);
        tracing::trace!(token = token.full, source = %source, target = %self.target, delta, "resolved token");

        let range = self.return_data.then(|| Range {
            string: token.full.to_string(),
            time: delta,
            start: token.start,
            end: token.end,
        });
        Resolution::Resolved { delta, range }
    }
}

/// Running total and collected ranges of one parse call
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    time: f64,
    ranges: Vec<Range>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a delta; deltas are summed strictly in arrival order
    pub fn add(&mut self, delta: f64, range: Option<Range>) {
        self.time += delta;
        if let Some(range) = range {
            self.ranges.push(range);
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn into_parts(self) -> (f64, Vec<Range>) {
        (self.time, self.ranges)
    }
}
