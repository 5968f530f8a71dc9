//! Standard time unit table, ordered from shortest to longest

use std::sync::LazyLock;
use crate::{UnitDefinition, UnitRegistry};

/// Shared standard registry, built on first use and never mutated
static STANDARD: LazyLock<UnitRegistry> = LazyLock::new(standard);

/// Get the process-wide standard registry
pub fn standard_registry() -> &'static UnitRegistry {
    &STANDARD
}

/// Build a fresh copy of the standard unit table.
///
/// Units are named by their symbol ("ms", "h") so the symbol resolves in
/// any casing. Minute and month keep word names: their symbols "m" and "M"
/// differ only by case and must stay exact aliases.
///
/// Month and year use the average Gregorian lengths (365.2425 days per
/// year); decade, century and millennium are multiples of that year.
pub fn standard() -> UnitRegistry {
    let mut registry = UnitRegistry::default();
    register_sub_second_units(&mut registry);
    register_clock_units(&mut registry);
    register_calendar_units(&mut registry);
    registry
}

fn register_sub_second_units(registry: &mut UnitRegistry) {
    registry.register(UnitDefinition::new("ns", &["nanosecond", "nanoseconds", "nsec"], 1e-9));
    registry.register(UnitDefinition::new("us", &["μs", "µs", "microsecond", "microseconds", "usec"], 1e-6));
    registry.register(UnitDefinition::new("ms", &["millisecond", "milliseconds", "msec", "msecs"], 1e-3));
}

fn register_clock_units(registry: &mut UnitRegistry) {
    registry.register(UnitDefinition::second());
    registry.register(UnitDefinition::new("minute", &["m", "min", "mins", "minutes"], 60.0));
    registry.register(UnitDefinition::new("h", &["hour", "hours", "hr", "hrs"], 3600.0));
}

fn register_calendar_units(registry: &mut UnitRegistry) {
    registry.register(UnitDefinition::new("d", &["day", "days"], 86400.0));
    registry.register(UnitDefinition::new("w", &["week", "weeks", "wk", "wks"], 604800.0));
    registry.register(UnitDefinition::new("fortnight", &["fortnights"], 1209600.0));
    // "M" is a month, "m" a minute
    registry.register(UnitDefinition::new("month", &["M", "mo", "mon", "mos", "months"], 2629746.0));
    registry.register(UnitDefinition::new("y", &["year", "years", "yr", "yrs"], 31556952.0));
    registry.register(UnitDefinition::new("decade", &["decades"], 315569520.0));
    registry.register(UnitDefinition::new("century", &["centuries"], 3155695200.0));
    registry.register(UnitDefinition::new("millennium", &["millennia", "millenniums"], 31556952000.0));
}
