use std::fs::read_to_string;
use serde::Deserialize;
use crate::errors::UnrecoverableError;

const CONFIG_PATH: &str = "config.json";

#[derive(Deserialize, Clone)]
pub struct WebServer {
    pub bind_address: String,
    pub bind_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct PowerApi {
    pub base_url: String,
}

#[derive(Deserialize, Clone)]
pub struct Config {
    pub web_server: WebServer,
    pub power: PowerApi,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            web_server: WebServer {
                bind_address: "0.0.0.0".to_string(),
                bind_port: 8080,
            },
            power: PowerApi {
                base_url: "https://power.larc.nasa.gov/api".to_string(),
            },
        }
    }
}

/// Returns the service configuration
///
/// Read from config.json in the working directory when present,
/// otherwise the built-in defaults are used
pub fn config() -> Result<Config, UnrecoverableError> {
    match read_to_string(CONFIG_PATH) {
        Ok(json) => Ok(serde_json::from_str(&json)?),
        Err(_) => Ok(Config::default()),
    }
}
