use std::fmt;

use crate::value::PreferenceType;

/// Typed handle for a preference entry together with the value readers see
/// when the entry is absent.
#[derive(Clone)]
pub struct PreferenceKey<T> {
    name: &'static str,
    default: T,
}

impl<T: PreferenceType> PreferenceKey<T> {
    pub const fn new(name: &'static str, default: T) -> Self {
        Self { name, default }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn default_value(&self) -> T {
        self.default.clone()
    }
}

impl<T> fmt::Debug for PreferenceKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PreferenceKey").field(&self.name).finish()
    }
}

/// The fixed set of keys persisted by the app.
pub mod keys {
    use super::PreferenceKey;

    pub const MOSAIC_ON: PreferenceKey<bool> = PreferenceKey::new("mosaic_on", false);
    pub const FACE_ON: PreferenceKey<bool> = PreferenceKey::new("face_on", false);
    pub const PLATE_ON: PreferenceKey<bool> = PreferenceKey::new("plate_on", false);
    pub const FACE_COUNT: PreferenceKey<i32> = PreferenceKey::new("face_count", 0);
    pub const FACE_LIST: PreferenceKey<Vec<String>> = PreferenceKey::new("face_list", Vec::new());
    pub const BLUR_VALUE: PreferenceKey<f32> = PreferenceKey::new("blur_value", 30.0);

    /// Every key name the app reads or writes.
    pub const ALL: &[&str] = &[
        "mosaic_on",
        "face_on",
        "plate_on",
        "face_count",
        "face_list",
        "blur_value",
    ];
}
