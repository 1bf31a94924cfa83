use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::key::PreferenceKey;
use crate::value::{PreferenceType, PreferenceValue};

/// Snapshot of every stored preference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preferences {
    values: BTreeMap<String, PreferenceValue>,
}

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value stored under `key`, or the key's default when it is absent or
    /// holds a different type.
    pub fn get<T: PreferenceType>(&self, key: &PreferenceKey<T>) -> T {
        match self.values.get(key.name()) {
            None => key.default_value(),
            Some(value) => T::from_value(value).unwrap_or_else(|| {
                warn!(
                    key = key.name(),
                    found = value.type_name(),
                    "stored preference has unexpected type, using default"
                );
                key.default_value()
            }),
        }
    }

    pub fn set<T: PreferenceType>(&mut self, key: &PreferenceKey<T>, value: T) {
        match value.into_value() {
            PreferenceValue::Float(v) if !v.is_finite() => {
                // JSON cannot carry NaN or infinities; an absent key reads as the default.
                warn!(key = key.name(), value = %v, "dropping non-finite preference value");
                self.values.remove(key.name());
            }
            value => {
                self.values.insert(key.name().to_string(), value);
            }
        }
    }

    pub fn remove<T: PreferenceType>(&mut self, key: &PreferenceKey<T>) -> bool {
        self.values.remove(key.name()).is_some()
    }

    pub fn contains<T: PreferenceType>(&self, key: &PreferenceKey<T>) -> bool {
        self.values.contains_key(key.name())
    }

    /// Raw value by name, bypassing type conversion.
    pub fn raw(&self, name: &str) -> Option<&PreferenceValue> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
