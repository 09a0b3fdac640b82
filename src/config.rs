use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api/upload";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub endpoint: String,
    pub timeout_secs: Option<u64>,
    pub accepted_extensions: Vec<String>,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(&get_user_config_path(), Path::new("smartnotes.toml"))
    }

    /// Layers: defaults, user config, local config, `SMARTNOTES_*` env.
    pub fn load(user_config_path: &Path, local_config_path: &Path) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("endpoint", DEFAULT_ENDPOINT)?
            .set_default("accepted_extensions", vec!["pdf", "txt", "doc", "docx"])?
            .set_default("log_level", "info")?
            .add_source(File::from(user_config_path.to_path_buf()).required(false))
            .add_source(File::from(local_config_path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("SMARTNOTES"))
            .build()?;

        s.try_deserialize()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn log_dir(&self) -> PathBuf {
        match &self.log_dir {
            Some(dir) => PathBuf::from(shellexpand::tilde(dir).as_ref()),
            None => {
                let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
                path.push("smartnotes");
                path.push("logs");
                path
            }
        }
    }
}

pub fn get_user_config_path() -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(".config");
    path.push("smartnotes");
    path.push("smartnotes.toml");
    path
}

/// Writes `endpoint` into the user config, keeping every other key.
pub fn save_endpoint(endpoint: &str) -> Result<(), anyhow::Error> {
    save_endpoint_to(&get_user_config_path(), endpoint)
}

pub fn save_endpoint_to(user_config_path: &Path, endpoint: &str) -> Result<(), anyhow::Error> {
    if let Some(parent) = user_config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let config_str = fs::read_to_string(user_config_path).unwrap_or_else(|_| "".to_string());
    let mut doc = config_str.parse::<toml::Table>()?;

    doc.insert("endpoint".to_string(), toml::Value::String(endpoint.to_string()));

    fs::write(user_config_path, doc.to_string())?;

    Ok(())
}
