//! Duration Parser - free-form duration strings to numbers
//!
//! Scans text such as `"1h 30m 12.5s"` or `"2,5 days"` for amount/unit
//! pairs, converts each into a target unit and sums them.
//!
//! ```
//! use duration_parser::{parse, ParseOptions};
//!
//! let options = ParseOptions::new().with_target("minute");
//! assert_eq!(parse("1h 30m", &options).unwrap().time(), 90.0);
//! ```
//!
//! Rules:
//! - A number without a unit counts as seconds
//! - A comma between two digits is a decimal point
//! - Unknown units are skipped unless `ignore_error` is off
//! - An unknown target unit is always an error

mod error;
mod options;
mod parser;
mod resolver;
mod tokenizer;

pub use error::{codes, ErrorBody, ParseError};
pub use options::{ParseOptions, ParseResult, Parsed, Range, DEFAULT_TARGET};
pub use parser::DurationParser;
pub use resolver::{Accumulator, Resolution, Resolver};
pub use tokenizer::{normalize_decimal_commas, Match, Tokenizer, Tokens};

pub use duration_units::{standard_registry, RegistryError, UnitDefinition, UnitRegistry};

/// Parse `input` with the standard unit table
pub fn parse(input: &str, options: &ParseOptions) -> Result<Parsed, ParseError> {
    DurationParser::default().parse(input, options)
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{parse, DurationParser, ParseError, ParseOptions, ParseResult, Parsed, Range};
}
