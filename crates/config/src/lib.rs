use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &["mozik.toml", "config/mozik.toml"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Settings for the authentication server the client talks to.
///
/// ```
/// use mozik_config::ApiConfig;
///
/// let api = ApiConfig::default();
/// assert_eq!(api.base_url, "http://10.0.2.2:8080/");
/// assert!(api.request_timeout_seconds.is_none());
/// assert_eq!(api.endpoint("login"), "http://10.0.2.2:8080/login");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "ApiConfig::default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,
}

impl ApiConfig {
    fn default_base_url() -> String {
        // Host loopback as seen from the Android emulator.
        "http://10.0.2.2:8080/".to_string()
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            request_timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "StorageConfig::default_directory")]
    pub directory: PathBuf,
    #[serde(default = "StorageConfig::default_name")]
    pub name: String,
}

impl StorageConfig {
    fn default_directory() -> PathBuf {
        PathBuf::from("mozik-data")
    }

    fn default_name() -> String {
        "mosaic_prefs".to_string()
    }

    /// Location of the preference file for the configured store.
    pub fn preferences_path(&self) -> PathBuf {
        self.directory.join(format!("{}.json", self.name))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: Self::default_directory(),
            name: Self::default_name(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            bail!("api.base_url must not be empty");
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            bail!("api.base_url must be an http(s) URL, got {base_url}");
        }
        if self.api.request_timeout_seconds == Some(0) {
            bail!("api.request_timeout_seconds must be greater than zero when set");
        }
        if self.storage.name.trim().is_empty() {
            bail!("storage.name must not be empty");
        }
        if self.storage.name.contains(['/', '\\']) {
            bail!(
                "storage.name must be a plain file stem, got {}",
                self.storage.name
            );
        }
        Ok(())
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use mozik_config::load;
///
/// std::env::remove_var("MOZIK_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.api.base_url.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder()
        .set_default("api.base_url", defaults.api.base_url.clone())?
        .set_default(
            "storage.directory",
            defaults.storage.directory.display().to_string(),
        )?
        .set_default("storage.name", defaults.storage.name.clone())?;

    let environment_overrides = config::Environment::with_prefix("MOZIK").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("MOZIK_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via MOZIK_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    config.validate().context("invalid configuration")?;

    debug!(?config, "loaded configuration");
    Ok(config)
}
