use std::{env, path::PathBuf, time::Duration};

use crate::db::delivery_store::DeliveryOptions;

const DEFAULT_GATES: &str = "Gate 1,Gate 2,Gate 3,Gate 4";
const DEFAULT_ZONES: &str = "Dry,Chilled,Frozen,Hazmat";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub notification_log: PathBuf,
    pub gates: Vec<String>,
    pub zones: Vec<String>,
    pub generator_url: String,
    pub generator_model: String,
    pub generator_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        Ok(Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://delivery_desk.db".to_string()),
            notification_log: env::var("NOTIFICATION_LOG")
                .unwrap_or_else(|_| "notifications.log".to_string())
                .into(),
            gates: split_list(&env::var("DELIVERY_GATES").unwrap_or_else(|_| DEFAULT_GATES.to_string())),
            zones: split_list(&env::var("DELIVERY_ZONES").unwrap_or_else(|_| DEFAULT_ZONES.to_string())),
            generator_url: env::var("GENERATOR_URL")
                .unwrap_or_else(|_| "http://localhost:11434/api/generate".to_string()),
            generator_model: env::var("GENERATOR_MODEL").unwrap_or_else(|_| "llama3".to_string()),
            generator_timeout: Duration::from_secs(
                env::var("GENERATOR_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .map_err(|_| ConfigError::InvalidTimeout)?,
            ),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Gate and zone enumerations handed to the delivery store.
    pub fn delivery_options(&self) -> DeliveryOptions {
        DeliveryOptions {
            gates: self.gates.clone(),
            zones: self.zones.clone(),
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid generator timeout")]
    InvalidTimeout,
}

#[cfg(test)]
mod tests {
    use super::split_list;

    #[test]
    fn split_list_trims_and_drops_empty_entries() {
        assert_eq!(
            split_list(" Gate 1, Gate 2 ,,Gate 3"),
            vec!["Gate 1", "Gate 2", "Gate 3"]
        );
        assert!(split_list("").is_empty());
    }
}
