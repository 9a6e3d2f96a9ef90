use super::{load_config_and_credentials, prompts};
use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use media_sync_config::{mask_secret, Config, CredentialStore, PathManager};
use serde_json::json;

const NOT_SET: &str = "(not set)";

pub async fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    match cmd {
        ConfigCommands::Show { full } => show_config(&paths, full, output),
        ConfigCommands::SetCookies { at_main, ubid_main } => set_cookies(&paths, at_main, ubid_main, output),
        ConfigCommands::Init { force } => init_config(&paths, force, output),
    }
}

fn show_config(paths: &PathManager, full: bool, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    if !config_file.exists() {
        output.warn(format!("Configuration file not found at: {}", config_file.display()));
        output.println("Defaults are in use. Run `imdb-export config init` to write them out.");
    }

    let (config, credentials) = load_config_and_credentials(paths)?;
    let rows = config_rows(&config, &credentials, full);

    if output.is_human() {
        if output.is_quiet() {
            return Ok(());
        }
        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
        table.set_header(vec![
            Cell::new("Setting").fg(Color::Cyan).add_attribute(Attribute::Bold),
            Cell::new(config_file.display().to_string()).add_attribute(Attribute::Bold),
        ]);
        for (key, value) in &rows {
            table.add_row(vec![Cell::new(key), Cell::new(value)]);
        }
        println!("{}", table);
    } else {
        let map: serde_json::Map<String, serde_json::Value> = rows
            .into_iter()
            .map(|(key, value)| (key.to_string(), json!(value)))
            .collect();
        output.json(&json!({ "config_file": config_file.display().to_string(), "settings": map }));
    }
    Ok(())
}

/// Key/value view of the effective settings; cookies masked unless `full`.
fn config_rows(config: &Config, credentials: &CredentialStore, full: bool) -> Vec<(&'static str, String)> {
    let secret = |value: Option<&String>| match value {
        Some(v) if full => v.clone(),
        Some(v) => mask_secret(v),
        None => NOT_SET.to_string(),
    };
    let plain = |value: Option<&String>| value.cloned().unwrap_or_else(|| NOT_SET.to_string());

    vec![
        ("imdb.base_url", config.imdb.base_url.clone()),
        ("imdb.user_id", plain(config.imdb.user_id.as_ref())),
        ("imdb.watchlist_id", plain(config.imdb.watchlist_id.as_ref())),
        (
            "imdb.request_timeout_secs",
            config
                .imdb
                .request_timeout_secs
                .map(|s| s.to_string())
                .unwrap_or_else(|| NOT_SET.to_string()),
        ),
        ("export.watchlist", config.export.watchlist.to_string()),
        ("export.lists", config.export.lists.to_string()),
        ("export.ratings", config.export.ratings.to_string()),
        ("imdb_cookie_at_main", secret(credentials.get_imdb_cookie_at_main())),
        ("imdb_cookie_ubid_main", secret(credentials.get_imdb_cookie_ubid_main())),
    ]
}

fn set_cookies(paths: &PathManager, at_main: Option<String>, ubid_main: Option<String>, output: &Output) -> Result<()> {
    let at_main = prompts::secret_or_prompt(at_main, "at-main cookie")?;
    let ubid_main = prompts::secret_or_prompt(ubid_main, "ubid-main cookie")?;

    let mut credentials = CredentialStore::new(paths.credentials_file());
    credentials
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {:#}", e))?;
    credentials.set_imdb_cookie_at_main(at_main);
    credentials.set_imdb_cookie_ubid_main(ubid_main);
    credentials
        .save()
        .map_err(|e| eyre!("Failed to save credentials: {:#}", e))?;

    output.success(format!("IMDb cookies saved to {}", paths.credentials_file().display()));
    Ok(())
}

fn init_config(paths: &PathManager, force: bool, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    if config_file.exists() && !force {
        output.warn(format!(
            "Configuration already exists at {} (use --force to overwrite)",
            config_file.display()
        ));
        return Ok(());
    }

    paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create config directories: {:#}", e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to write {}: {:#}", config_file.display(), e))?;

    output.success(format!("Configuration written to {}", config_file.display()));
    Ok(())
}
