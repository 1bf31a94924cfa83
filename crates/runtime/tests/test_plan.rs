use std::fs;

use anyhow::Result;
use mozik_config::AppConfig;
use mozik_preferences::keys;
use mozik_runtime::AppServices;
use tempfile::TempDir;

fn config_in(dir: &TempDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.storage.directory = dir.path().join("nested/data");
    config.api.base_url = "http://127.0.0.1:9/".into();
    config
}

#[tokio::test(flavor = "multi_thread")]
async fn initialise_opens_store_under_configured_directory() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config_in(&temp_dir);

    let services = AppServices::initialise(&config).await?;
    assert_eq!(services.auth.base_url(), "http://127.0.0.1:9/");

    let path = config.storage.preferences_path();
    assert!(!path.exists(), "store file is created on first write");

    services.store.set(&keys::MOSAIC_ON, true).await?;
    assert!(path.exists());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn initialise_reports_corrupt_store_with_context() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config_in(&temp_dir);
    let path = config.storage.preferences_path();
    fs::create_dir_all(path.parent().expect("store path has a parent"))?;
    fs::write(&path, "not json")?;

    let error = match AppServices::initialise(&config).await {
        Ok(_) => panic!("expected a corrupt store to fail"),
        Err(error) => error,
    };
    let message = format!("{error:?}");
    assert!(
        message.contains("failed to open preference store"),
        "expected store context, got {message}"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn ephemeral_services_leave_disk_untouched() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config_in(&temp_dir);

    let services = AppServices::ephemeral(&config).await?;
    services.store.set(&keys::BLUR_VALUE, 55.0).await?;

    assert_eq!(services.store.get(&keys::BLUR_VALUE).await?, 55.0);
    assert!(!config.storage.preferences_path().exists());
    Ok(())
}
