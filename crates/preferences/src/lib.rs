//! # Mozik Preferences
//!
//! A small, durable key-value store for application preferences. Values are
//! booleans, integers, floats, or ordered string sets, addressed through typed
//! keys that carry their own defaults.
//!
//! All access goes through a single background worker that owns the backing
//! file, so concurrent edits from different screens are applied one at a time
//! and never interleave.
//!
//! ```no_run
//! use mozik_preferences::{keys, PreferenceStore};
//!
//! # async fn demo() -> Result<(), mozik_preferences::PreferenceError> {
//! let store = PreferenceStore::open_file("mozik-data/mosaic_prefs.json").await?;
//! store.set(&keys::MOSAIC_ON, true).await?;
//! assert!(store.get(&keys::MOSAIC_ON).await?);
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod error;
pub mod key;
pub mod preferences;
pub mod store;
pub mod value;

pub use backend::{FileBackend, MemoryBackend, PreferenceBackend};
pub use error::{PreferenceError, PreferenceResult};
pub use key::{keys, PreferenceKey};
pub use preferences::Preferences;
pub use store::PreferenceStore;
pub use value::{PreferenceType, PreferenceValue};
