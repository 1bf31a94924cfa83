//! Error types for the preference store.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference storage I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preference file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("preference storage unavailable: {0}")]
    Unavailable(String),

    #[error("preference store worker has shut down")]
    Closed,
}

pub type PreferenceResult<T> = Result<T, PreferenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            PreferenceError::Closed.to_string(),
            "preference store worker has shut down"
        );

        let io = PreferenceError::Io {
            path: PathBuf::from("prefs.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(io.to_string().starts_with("preference storage I/O failed for prefs.json"));
    }
}
