//! Parse façade - validates options, then folds tokens into a total

use duration_units::{standard_registry, UnitDefinition, UnitRegistry};
use serde_json::Value as JsonValue;
use crate::resolver::{Accumulator, Resolution, Resolver};
use crate::{ParseError, ParseOptions, ParseResult, Parsed, Tokenizer};

/// Duration parser bound to a unit registry
#[derive(Debug, Clone, Copy)]
pub struct DurationParser<'r> {
    registry: &'r UnitRegistry,
}

impl Default for DurationParser<'static> {
    fn default() -> Self {
        DurationParser::new(standard_registry())
    }
}

impl<'r> DurationParser<'r> {
    pub fn new(registry: &'r UnitRegistry) -> Self {
        DurationParser { registry }
    }

    pub fn registry(&self) -> &'r UnitRegistry {
        self.registry
    }

    /// Parse `input` into a total, or into the total plus ranges when
    /// `options.return_data` is set.
    pub fn parse(&self, input: &str, options: &ParseOptions) -> Result<Parsed, ParseError> {
        let (time, ranges) = self.run(input, options, options.return_data)?.into_parts();
        if options.return_data {
            Ok(Parsed::Data(ParseResult { time, ranges }))
        } else {
            Ok(Parsed::Time(time))
        }
    }

    /// Parse into a bare total, ignoring `options.return_data`
    pub fn parse_time(&self, input: &str, options: &ParseOptions) -> Result<f64, ParseError> {
        Ok(self.run(input, options, false)?.time())
    }

    /// Parse into the total plus ranges, ignoring `options.return_data`
    pub fn parse_data(&self, input: &str, options: &ParseOptions) -> Result<ParseResult, ParseError> {
        let (time, ranges) = self.run(input, options, true)?.into_parts();
        Ok(ParseResult { time, ranges })
    }

    /// Parse a dynamically typed input. Anything but a JSON string is rejected.
    pub fn parse_value(&self, input: &JsonValue, options: &ParseOptions) -> Result<Parsed, ParseError> {
        match input {
            JsonValue::String(text) => self.parse(text, options),
            other => Err(ParseError::InvalidInputType { found: json_type_name(other) }),
        }
    }

    /// Positional shorthand: total of `input` in `target`, skipping unknown units
    pub fn to_unit(&self, input: &str, target: &str) -> Result<f64, ParseError> {
        self.parse_time(input, &ParseOptions::new().with_target(target))
    }

    /// Resolve the configured target unit
    pub fn target_unit(&self, options: &ParseOptions) -> Result<&'r UnitDefinition, ParseError> {
        let target = options.target_or_default();
        self.registry
            .find(target)
            .ok_or_else(|| ParseError::UnknownTargetUnit(target.to_string()))
    }

    fn run(&self, input: &str, options: &ParseOptions, return_data: bool) -> Result<Accumulator, ParseError> {
        // Target is checked before scanning, so a bad target fails even for empty input
        let target = self.target_unit(options)?;
        let resolver = Resolver::new(self.registry, target)
            .with_ignore_error(options.ignore_error)
            .with_return_data(return_data);

        let tokenizer = Tokenizer::new(input);
        let mut acc = Accumulator::new();
        for token in tokenizer.tokens() {
            match resolver.resolve(&token) {
                Resolution::Resolved { delta, range } => acc.add(delta, range),
                Resolution::Skipped => {}
                Resolution::Fatal(err) => {
                    tracing::debug!(error = %err, "duration parse aborted");
                    return Err(err);
                }
            }
        }
        Ok(acc)
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
