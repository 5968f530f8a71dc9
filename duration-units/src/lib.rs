//! Duration Units - time unit definitions and lookup
//!
//! Every unit carries its length in seconds, which makes all units
//! commensurable through a single factor.
//!
//! Lookup rules:
//! - Canonical names match in any casing ("ms", "MS", "Ms")
//! - Aliases match exactly ("m" is a minute, "M" a month)
//! - The first unit in registry order wins when several match

mod error;
mod registry;
mod unit;
mod units;

pub use error::RegistryError;
pub use registry::UnitRegistry;
pub use unit::UnitDefinition;
pub use units::{standard, standard_registry};
