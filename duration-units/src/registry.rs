//! Unit registry - ordered, immutable lookup table of time units

use std::collections::HashMap;
use crate::{RegistryError, UnitDefinition};

/// Registry of known time units.
///
/// Enumeration order is the order units were supplied in, and it is
/// observable: when an identifier matches several units (a shared alias,
/// or one unit's alias equal to another's name) the earliest unit wins.
#[derive(Debug, Clone, Default)]
pub struct UnitRegistry {
    units: Vec<UnitDefinition>,
    /// canonical name -> position
    names: HashMap<String, usize>,
    /// alias -> position of the first unit declaring it
    aliases: HashMap<String, usize>,
}

impl UnitRegistry {
    /// Build a registry from unit definitions, validating every entry
    pub fn new(units: Vec<UnitDefinition>) -> Result<Self, RegistryError> {
        let mut registry = UnitRegistry::default();
        for (position, unit) in units.into_iter().enumerate() {
            registry.validate(position, &unit)?;
            registry.register(unit);
        }
        tracing::debug!(units = registry.len(), "unit registry built");
        Ok(registry)
    }

    /// Build a registry from a JSON array of `{ "name", "aliases", "value" }`
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let units: Vec<UnitDefinition> = serde_json::from_str(json)?;
        Self::new(units)
    }

    /// Find a unit by canonical name (any casing) or alias (exact).
    ///
    /// Returns the first unit in registry order that satisfies either test.
    pub fn find(&self, identifier: &str) -> Option<&UnitDefinition> {
        let by_name = self.names.get(&identifier.to_lowercase()).copied();
        let by_alias = self.aliases.get(identifier).copied();

        let position = match (by_name, by_alias) {
            (Some(n), Some(a)) => n.min(a),
            (n, a) => n.or(a)?,
        };
        self.units.get(position)
    }

    /// Get a unit by its exact canonical name
    pub fn get(&self, name: &str) -> Option<&UnitDefinition> {
        self.names.get(name).and_then(|&position| self.units.get(position))
    }

    /// All units in registry order
    pub fn units(&self) -> impl Iterator<Item = &UnitDefinition> {
        self.units.iter()
    }

    /// Canonical names in registry order
    pub fn names(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    fn validate(&self, position: usize, unit: &UnitDefinition) -> Result<(), RegistryError> {
        if unit.name.is_empty() {
            return Err(RegistryError::EmptyName(position));
        }
        if unit.name.to_lowercase() != unit.name {
            return Err(RegistryError::NameNotLowercase(unit.name.clone()));
        }
        if self.names.contains_key(&unit.name) {
            return Err(RegistryError::DuplicateName(unit.name.clone()));
        }
        if !(unit.value.is_finite() && unit.value > 0.0) {
            return Err(RegistryError::InvalidValue {
                name: unit.name.clone(),
                value: unit.value,
            });
        }
        Ok(())
    }

    /// Append a unit without validation. Callers guarantee the invariants.
    pub(crate) fn register(&mut self, unit: UnitDefinition) {
        let position = self.units.len();
        self.names.insert(unit.name.clone(), position);
        for alias in &unit.aliases {
            self.aliases.entry(alias.clone()).or_insert(position);
        }
        self.units.push(unit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(name: &str, aliases: &[&str], value: f64) -> UnitDefinition {
        UnitDefinition::new(name, aliases, value)
    }

    #[test]
    fn test_find_by_name_and_alias() {
        let registry = UnitRegistry::new(vec![
            unit("second", &["s", "sec"], 1.0),
            unit("minute", &["m", "min"], 60.0),
        ]).unwrap();

        assert_eq!(registry.find("second").unwrap().value, 1.0);
        assert_eq!(registry.find("SECOND").unwrap().value, 1.0);
        assert_eq!(registry.find("min").unwrap().name, "minute");
        assert!(registry.find("MIN").is_none());
        assert!(registry.find("hour").is_none());
        assert!(registry.find("").is_none());
    }

    #[test]
    fn test_shared_alias_first_wins() {
        let registry = UnitRegistry::new(vec![
            unit("tick", &["t"], 0.05),
            unit("tock", &["t"], 0.5),
        ]).unwrap();

        assert_eq!(registry.find("t").unwrap().name, "tick");
    }

    #[test]
    fn test_alias_of_earlier_unit_beats_later_name() {
        let registry = UnitRegistry::new(vec![
            unit("beat", &["moment"], 2.0),
            unit("moment", &[], 90.0),
        ]).unwrap();

        assert_eq!(registry.find("moment").unwrap().name, "beat");
        // Name lookup is case-insensitive, alias lookup is not
        assert_eq!(registry.find("Moment").unwrap().name, "moment");
        assert_eq!(registry.get("moment").unwrap().value, 90.0);
    }

    #[test]
    fn test_name_of_earlier_unit_beats_later_alias() {
        let registry = UnitRegistry::new(vec![
            unit("moment", &[], 90.0),
            unit("beat", &["moment"], 2.0),
        ]).unwrap();

        assert_eq!(registry.find("moment").unwrap().name, "moment");
    }

    #[test]
    fn test_enumeration_order() {
        let registry = UnitRegistry::new(vec![
            unit("minute", &[], 60.0),
            unit("second", &[], 1.0),
            unit("hour", &[], 3600.0),
        ]).unwrap();

        assert_eq!(registry.names(), vec!["minute", "second", "hour"]);
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_rejects_invalid_tables() {
        assert!(matches!(
            UnitRegistry::new(vec![unit("", &[], 1.0)]),
            Err(RegistryError::EmptyName(0))
        ));
        assert!(matches!(
            UnitRegistry::new(vec![unit("Second", &[], 1.0)]),
            Err(RegistryError::NameNotLowercase(_))
        ));
        assert!(matches!(
            UnitRegistry::new(vec![unit("second", &[], 1.0), unit("second", &[], 2.0)]),
            Err(RegistryError::DuplicateName(_))
        ));
        assert!(matches!(
            UnitRegistry::new(vec![unit("never", &[], 0.0)]),
            Err(RegistryError::InvalidValue { .. })
        ));
        assert!(matches!(
            UnitRegistry::new(vec![unit("backwards", &[], -1.0)]),
            Err(RegistryError::InvalidValue { .. })
        ));
        assert!(matches!(
            UnitRegistry::new(vec![unit("forever", &[], f64::INFINITY)]),
            Err(RegistryError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_from_json() {
        let registry = UnitRegistry::from_json(r#"[
            {"name": "second", "aliases": ["s"], "value": 1},
            {"name": "jiffy", "aliases": ["j", "jiffies"], "value": 0.01}
        ]"#).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.find("jiffies").unwrap().value, 0.01);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(UnitRegistry::from_json("not json"), Err(RegistryError::Json(_))));
        assert!(matches!(
            UnitRegistry::from_json(r#"[{"name": "zero", "value": 0}]"#),
            Err(RegistryError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_empty_registry() {
        let registry = UnitRegistry::new(Vec::new()).unwrap();
        assert!(registry.is_empty());
        assert!(registry.find("second").is_none());
    }
}
