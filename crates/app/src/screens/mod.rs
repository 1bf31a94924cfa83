//! Headless screen view-models.
//!
//! Every screen renders into a [`ScreenView`], a title plus plain text lines,
//! which frontends can print or lay out however they like.

pub mod auth;
pub mod faces;
pub mod home;
pub mod settings;

use std::fmt;

pub use auth::{LoginScreen, SignupScreen};
pub use faces::{FaceListScreen, FaceRegisterScreen};
pub use home::{CameraScreen, GalleryScreen, MenuItem, VideoProcessorScreen};
pub use settings::SettingsScreen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenView {
    pub title: String,
    pub lines: Vec<String>,
}

impl ScreenView {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
        }
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.title.contains(needle) || self.lines.iter().any(|line| line.contains(needle))
    }
}

impl fmt::Display for ScreenView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Render a switch row, greyed out when it cannot be toggled.
pub(crate) fn switch_line(label: &str, on: bool, enabled: bool) -> String {
    let state = if on { "[ON]" } else { "[OFF]" };
    if enabled {
        format!("{label} {state}")
    } else {
        format!("{label} {state} (비활성)")
    }
}

pub(crate) fn link_line(label: &str, enabled: bool) -> String {
    if enabled {
        format!("> {label}")
    } else {
        format!("  {label} (비활성)")
    }
}
