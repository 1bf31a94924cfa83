//! In-memory mirror of the persisted mosaic settings.
//!
//! The model reads every preference group once when a screen mounts and
//! writes the affected group back after each change. Registered faces are
//! stored as a single list; the face count is always derived from it.

use mozik_preferences::{keys, PreferenceStore, Preferences};
use tracing::{debug, warn};

use crate::errors::{SettingsError, SettingsResult};

pub const BLUR_MIN: f32 = 0.0;
pub const BLUR_MAX: f32 = 100.0;
pub const FACE_NAME_PREFIX: &str = "얼굴";

/// Clamp a blur intensity into range. Non-finite input falls back to the default.
pub fn clamp_blur(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(BLUR_MIN, BLUR_MAX)
    } else {
        keys::BLUR_VALUE.default_value()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsState {
    pub mosaic_enabled: bool,
    pub face_blur_enabled: bool,
    pub plate_blur_enabled: bool,
    pub blur_intensity: f32,
    pub face_names: Vec<String>,
}

impl SettingsState {
    pub fn from_preferences(prefs: &Preferences) -> Self {
        let face_names = prefs.get(&keys::FACE_LIST);

        if prefs.contains(&keys::FACE_COUNT) {
            let stored = prefs.get(&keys::FACE_COUNT);
            if usize::try_from(stored).ok() != Some(face_names.len()) {
                warn!(
                    stored,
                    listed = face_names.len(),
                    "stored face count disagrees with face list, using list size"
                );
            }
        }

        Self {
            mosaic_enabled: prefs.get(&keys::MOSAIC_ON),
            face_blur_enabled: prefs.get(&keys::FACE_ON),
            plate_blur_enabled: prefs.get(&keys::PLATE_ON),
            blur_intensity: clamp_blur(prefs.get(&keys::BLUR_VALUE)),
            face_names,
        }
    }

    pub fn registered_face_count(&self) -> usize {
        self.face_names.len()
    }

    /// Face and plate switches only respond while mosaic is on.
    pub fn sub_toggles_enabled(&self) -> bool {
        self.mosaic_enabled
    }

    pub fn next_face_name(&self) -> String {
        next_face_name(&self.face_names)
    }
}

impl Default for SettingsState {
    fn default() -> Self {
        Self::from_preferences(&Preferences::new())
    }
}

/// Result of flipping a switch that may be disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Applied,
    Disabled,
}

/// First `얼굴 N` with `N > len` that is not taken yet.
fn next_face_name(existing: &[String]) -> String {
    let mut index = existing.len() + 1;
    loop {
        let candidate = format!("{FACE_NAME_PREFIX} {index}");
        if !existing.contains(&candidate) {
            return candidate;
        }
        index += 1;
    }
}

fn write_face_list(prefs: &mut Preferences, names: Vec<String>) {
    let count = i32::try_from(names.len()).unwrap_or(i32::MAX);
    prefs.set(&keys::FACE_COUNT, count);
    prefs.set(&keys::FACE_LIST, names);
}

pub struct SettingsModel {
    store: PreferenceStore,
    state: SettingsState,
}

impl SettingsModel {
    /// Read all settings groups from the store.
    pub async fn load(store: PreferenceStore) -> SettingsResult<Self> {
        let prefs = store.data().await?;
        let state = SettingsState::from_preferences(&prefs);
        debug!(?state, "settings loaded");
        Ok(Self { store, state })
    }

    pub fn state(&self) -> &SettingsState {
        &self.state
    }

    pub fn store(&self) -> &PreferenceStore {
        &self.store
    }

    pub async fn reload(&mut self) -> SettingsResult<()> {
        let prefs = self.store.data().await?;
        self.state = SettingsState::from_preferences(&prefs);
        Ok(())
    }

    pub async fn set_mosaic_enabled(&mut self, enabled: bool) -> SettingsResult<()> {
        let mut next = self.state.clone();
        next.mosaic_enabled = enabled;
        self.write_mosaic_group(next).await
    }

    pub async fn set_face_blur_enabled(&mut self, enabled: bool) -> SettingsResult<ToggleOutcome> {
        if !self.state.sub_toggles_enabled() {
            debug!("face blur switch ignored while mosaic is off");
            return Ok(ToggleOutcome::Disabled);
        }
        let mut next = self.state.clone();
        next.face_blur_enabled = enabled;
        self.write_mosaic_group(next).await?;
        Ok(ToggleOutcome::Applied)
    }

    pub async fn set_plate_blur_enabled(
        &mut self,
        enabled: bool,
    ) -> SettingsResult<ToggleOutcome> {
        if !self.state.sub_toggles_enabled() {
            debug!("plate blur switch ignored while mosaic is off");
            return Ok(ToggleOutcome::Disabled);
        }
        let mut next = self.state.clone();
        next.plate_blur_enabled = enabled;
        self.write_mosaic_group(next).await?;
        Ok(ToggleOutcome::Applied)
    }

    /// Store a new blur intensity, clamped into range. Returns the stored value.
    pub async fn set_blur_intensity(&mut self, value: f32) -> SettingsResult<f32> {
        let clamped = clamp_blur(value);
        if clamped != value {
            debug!(requested = value, clamped, "blur intensity clamped");
        }
        self.store.set(&keys::BLUR_VALUE, clamped).await?;
        self.state.blur_intensity = clamped;
        Ok(clamped)
    }

    /// Append the next synthetic face name and return it.
    pub async fn register_face(&mut self) -> SettingsResult<String> {
        let (committed, name) = self
            .store
            .update(|prefs| {
                let mut names = prefs.get(&keys::FACE_LIST);
                let name = next_face_name(&names);
                names.push(name.clone());
                write_face_list(prefs, names);
                name
            })
            .await?;

        self.state = SettingsState::from_preferences(&committed);
        debug!(%name, count = self.state.registered_face_count(), "face registered");
        Ok(name)
    }

    pub async fn remove_face(&mut self, name: &str) -> SettingsResult<()> {
        let target = name.to_string();
        let (committed, removed) = self
            .store
            .update(move |prefs| {
                let mut names = prefs.get(&keys::FACE_LIST);
                let before = names.len();
                names.retain(|existing| existing != &target);
                let removed = names.len() != before;
                if removed {
                    write_face_list(prefs, names);
                }
                removed
            })
            .await?;

        self.state = SettingsState::from_preferences(&committed);
        if !removed {
            return Err(SettingsError::FaceNotFound(name.to_string()));
        }
        debug!(name, count = self.state.registered_face_count(), "face removed");
        Ok(())
    }

    /// Remove the face at `index` in the list as currently shown.
    pub async fn remove_face_at(&mut self, index: usize) -> SettingsResult<String> {
        let name = self
            .state
            .face_names
            .get(index)
            .cloned()
            .ok_or(SettingsError::FaceIndexOutOfRange(index))?;
        self.remove_face(&name).await?;
        Ok(name)
    }

    async fn write_mosaic_group(&mut self, next: SettingsState) -> SettingsResult<()> {
        let (mosaic, face, plate) = (
            next.mosaic_enabled,
            next.face_blur_enabled,
            next.plate_blur_enabled,
        );
        self.store
            .edit(move |prefs| {
                prefs.set(&keys::MOSAIC_ON, mosaic);
                prefs.set(&keys::FACE_ON, face);
                prefs.set(&keys::PLATE_ON, plate);
            })
            .await?;
        debug!(mosaic, face, plate, "mosaic settings saved");
        self.state = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_blur_bounds_and_non_finite() {
        assert_eq!(clamp_blur(-5.0), 0.0);
        assert_eq!(clamp_blur(250.0), 100.0);
        assert_eq!(clamp_blur(42.5), 42.5);
        assert_eq!(clamp_blur(f32::NAN), 30.0);
        assert_eq!(clamp_blur(f32::INFINITY), 30.0);
    }

    #[test]
    fn next_face_name_skips_taken_names() {
        assert_eq!(next_face_name(&[]), "얼굴 1");

        let remaining = vec!["얼굴 2".to_string()];
        assert_eq!(next_face_name(&remaining), "얼굴 3");

        let gap = vec!["얼굴 1".to_string(), "얼굴 3".to_string()];
        assert_eq!(next_face_name(&gap), "얼굴 4");
    }

    #[test]
    fn default_state_matches_documented_defaults() {
        let state = SettingsState::default();
        assert!(!state.mosaic_enabled);
        assert!(!state.face_blur_enabled);
        assert!(!state.plate_blur_enabled);
        assert_eq!(state.blur_intensity, 30.0);
        assert_eq!(state.registered_face_count(), 0);
    }

    #[test]
    fn face_count_is_derived_from_list() {
        let mut prefs = Preferences::new();
        prefs.set(&keys::FACE_COUNT, 7);
        prefs.set(&keys::FACE_LIST, vec!["얼굴 1".to_string()]);

        let state = SettingsState::from_preferences(&prefs);
        assert_eq!(state.registered_face_count(), 1);
    }
}
