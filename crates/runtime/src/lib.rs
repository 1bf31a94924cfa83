use anyhow::{Context, Result};
use mozik_auth::AuthClient;
use mozik_config::AppConfig;
use mozik_preferences::PreferenceStore;
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    /// Install the global fmt subscriber. `RUST_LOG` overrides the `info` default.
    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// Long-lived services shared by every screen.
#[derive(Clone)]
pub struct AppServices {
    pub store: PreferenceStore,
    pub auth: AuthClient,
}

impl AppServices {
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let path = config.storage.preferences_path();
        let store = PreferenceStore::open_file(&path)
            .await
            .with_context(|| format!("failed to open preference store {}", path.display()))?;

        let auth = AuthClient::new(&config.api).context("failed to build auth client")?;

        info!(
            store = %path.display(),
            api = auth.base_url(),
            "app services ready"
        );
        Ok(Self { store, auth })
    }

    /// Same services, but preferences live only for this process.
    pub async fn ephemeral(config: &AppConfig) -> Result<Self> {
        let store = PreferenceStore::in_memory()
            .await
            .context("failed to start in-memory preference store")?;
        let auth = AuthClient::new(&config.api).context("failed to build auth client")?;

        info!(api = auth.base_url(), "app services ready (ephemeral store)");
        Ok(Self { store, auth })
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
