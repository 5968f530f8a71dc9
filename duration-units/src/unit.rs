//! Time unit representation with its seconds-based conversion factor

use std::fmt;
use serde::{Serialize, Deserialize};

/// A named time unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDefinition {
    /// Canonical lowercase name (e.g. "s", "minute"). Matched case-insensitively.
    pub name: String,
    /// Alternative spellings, symbols and plural forms. Matched case-sensitively.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Length of one unit in seconds
    pub value: f64,
}

impl UnitDefinition {
    pub fn new(name: &str, aliases: &[&str], value: f64) -> Self {
        UnitDefinition {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            value,
        }
    }

    /// The one-second unit, used for bare numbers without a suffix
    pub fn second() -> Self {
        UnitDefinition::new("s", &["second", "seconds", "sec", "secs"], 1.0)
    }

    /// Check whether `identifier` names this unit.
    ///
    /// The canonical name tolerates any casing; aliases must match exactly,
    /// so "m" and "M" can denote different units.
    pub fn matches(&self, identifier: &str) -> bool {
        identifier.to_lowercase() == self.name
            || self.aliases.iter().any(|alias| alias == identifier)
    }

    /// Convert an amount of this unit to seconds
    pub fn to_seconds(&self, amount: f64) -> f64 {
        amount * self.value
    }

    /// Convert an amount of this unit into `target` units
    pub fn convert_to(&self, amount: f64, target: &UnitDefinition) -> f64 {
        self.to_seconds(amount) / target.value
    }
}

impl fmt::Display for UnitDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
