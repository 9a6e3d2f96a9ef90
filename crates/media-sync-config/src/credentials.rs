use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

const IMDB_COOKIE_AT_MAIN: &str = "imdb_cookie_at_main";
const IMDB_COOKIE_UBID_MAIN: &str = "imdb_cookie_ubid_main";

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// Secrets kept apart from `config.toml` in `credentials.toml`.
pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    pub fn get_imdb_cookie_at_main(&self) -> Option<&String> {
        self.get(IMDB_COOKIE_AT_MAIN)
    }

    pub fn set_imdb_cookie_at_main(&mut self, value: String) {
        self.set(IMDB_COOKIE_AT_MAIN.to_string(), value);
    }

    pub fn get_imdb_cookie_ubid_main(&self) -> Option<&String> {
        self.get(IMDB_COOKIE_UBID_MAIN)
    }

    pub fn set_imdb_cookie_ubid_main(&mut self, value: String) {
        self.set(IMDB_COOKIE_UBID_MAIN.to_string(), value);
    }
}
