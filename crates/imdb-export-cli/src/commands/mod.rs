pub mod config;
pub mod export;
pub mod prompts;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use media_sync_config::{Config, CredentialStore, PathManager};

/// Config file and credential store from the standard locations.
pub(crate) fn load_config_and_credentials(paths: &PathManager) -> Result<(Config, CredentialStore)> {
    let config_file = paths.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {:#}", config_file.display(), e))?;

    let mut credentials = CredentialStore::new(paths.credentials_file());
    credentials
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {:#}", e))?;

    Ok((config, credentials))
}
