//! Error types for the app core.

use mozik_preferences::PreferenceError;
use thiserror::Error;

use crate::navigation::Destination;

/// Settings model errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Store(#[from] PreferenceError),

    #[error("No registered face named {0}")]
    FaceNotFound(String),

    #[error("No registered face at position {0}")]
    FaceIndexOutOfRange(usize),
}

/// Navigation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Unknown route: {0}")]
    UnknownRoute(String),
}

/// Errors raised while dispatching a user action
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    Store(#[from] PreferenceError),

    #[error("{action} is not available on the {} screen", destination.route())]
    Unsupported {
        action: &'static str,
        destination: Destination,
    },

    #[error("{0} is currently disabled")]
    Disabled(&'static str),
}

pub type SettingsResult<T> = Result<T, SettingsError>;
pub type AppResult<T> = Result<T, AppError>;
