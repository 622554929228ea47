//! Layered settings: optional `tyche.toml` file plus `TYCHE_*` environment
//! variables. Command-line flags override whatever is loaded here.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub generate: GenerateSettings,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Instances generated per schema when serving
    #[serde(default = "default_serve_count")]
    pub count: u32,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GenerateSettings {
    /// Instances generated per `generate` invocation
    #[serde(default = "default_generate_count")]
    pub count: u32,
    #[serde(default)]
    pub locale: Option<String>,
}

impl Settings {
    /// Loads settings from `tyche.toml` (if present) and the environment.
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("tyche").required(false))
            .add_source(Environment::with_prefix("TYCHE").separator("__"))
            .build()?;
        config.try_deserialize()
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            count: default_serve_count(),
        }
    }
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            count: default_generate_count(),
            locale: None,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_serve_count() -> u32 {
    10
}

fn default_generate_count() -> u32 {
    1
}
