use serde::{Deserialize, Serialize};

/// A single stored preference value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PreferenceValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    /// Insertion-ordered, duplicate-free.
    StringSet(Vec<String>),
}

impl PreferenceValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            PreferenceValue::Bool(_) => "bool",
            PreferenceValue::Int(_) => "int",
            PreferenceValue::Float(_) => "float",
            PreferenceValue::StringSet(_) => "string_set",
        }
    }
}

/// Rust types that can be stored under a [`PreferenceKey`](crate::PreferenceKey).
pub trait PreferenceType: Clone + Sized {
    fn into_value(self) -> PreferenceValue;
    fn from_value(value: &PreferenceValue) -> Option<Self>;
}

impl PreferenceType for bool {
    fn into_value(self) -> PreferenceValue {
        PreferenceValue::Bool(self)
    }

    fn from_value(value: &PreferenceValue) -> Option<Self> {
        match value {
            PreferenceValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl PreferenceType for i32 {
    fn into_value(self) -> PreferenceValue {
        PreferenceValue::Int(self)
    }

    fn from_value(value: &PreferenceValue) -> Option<Self> {
        match value {
            PreferenceValue::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl PreferenceType for f32 {
    fn into_value(self) -> PreferenceValue {
        PreferenceValue::Float(self)
    }

    fn from_value(value: &PreferenceValue) -> Option<Self> {
        match value {
            PreferenceValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl PreferenceType for Vec<String> {
    fn into_value(self) -> PreferenceValue {
        let mut unique: Vec<String> = Vec::with_capacity(self.len());
        for item in self {
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        PreferenceValue::StringSet(unique)
    }

    fn from_value(value: &PreferenceValue) -> Option<Self> {
        match value {
            PreferenceValue::StringSet(v) => Some(v.clone()),
            _ => None,
        }
    }
}
