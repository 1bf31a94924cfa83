//! # Mozik app core
//!
//! Headless application layer for Mozik: the settings model that mirrors the
//! preference store, the destination graph with its back-stack, and one
//! view-model per screen. [`App`] ties them together and is driven by
//! frontends through [`Action`]s.
//!
//! ```no_run
//! use mozik_app::{Action, App, Destination};
//! use mozik_auth::AuthClient;
//! use mozik_config::ApiConfig;
//! use mozik_preferences::PreferenceStore;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let store = PreferenceStore::in_memory().await?;
//! let auth = AuthClient::new(&ApiConfig::default())?;
//!
//! let mut app = App::start(store, auth);
//! app.dispatch(Action::Navigate(Destination::Settings)).await?;
//! app.dispatch(Action::SetMosaic(true)).await?;
//! println!("{}", app.view());
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod errors;
pub mod navigation;
pub mod screens;
pub mod settings;

pub use app::{Action, App, Field, Screen, APP_NAME, APP_VERSION};
pub use errors::{AppError, AppResult, NavigationError, SettingsError, SettingsResult};
pub use navigation::{Destination, NavController, Tab};
pub use screens::{MenuItem, ScreenView};
pub use settings::{clamp_blur, SettingsModel, SettingsState, ToggleOutcome};
