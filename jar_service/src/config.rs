// jar_service/src/config.rs

use crate::errors::{AppError, Result};
use clayjar::Deadlines;
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Text,
  Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub kafka_brokers: Vec<String>,
  pub kafka_topic: String,
  pub deadlines: Deadlines,
  pub log_format: LogFormat,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Builds the configuration from any key lookup. Empty values count as unset.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_env = |var_name: &str, default: &str| {
      lookup(var_name)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
    };
    let get_secs = |var_name: &str, default: u64| -> Result<Duration> {
      let raw = get_env(var_name, &default.to_string());
      raw
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| AppError::Config(format!("Invalid {}: {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST", "0.0.0.0");
    let server_port = get_env("SERVER_PORT", "8080")
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL", "postgres://localhost:5432/clayjar");
    let kafka_brokers = get_env("KAFKA_BROKERS", "localhost:9092")
      .split(',')
      .map(str::trim)
      .filter(|b| !b.is_empty())
      .map(String::from)
      .collect();
    let kafka_topic = get_env("KAFKA_TOPIC", "jar-events");

    let deadlines = Deadlines {
      store: get_secs("STORE_TIMEOUT_SECS", 5)?,
      store_scan: get_secs("STORE_SCAN_TIMEOUT_SECS", 10)?,
      publish: get_secs("PUBLISH_TIMEOUT_SECS", 5)?,
    };

    let log_format = match get_env("LOG_FORMAT", "text").to_lowercase().as_str() {
      "text" => LogFormat::Text,
      "json" => LogFormat::Json,
      other => return Err(AppError::Config(format!("Invalid LOG_FORMAT '{}': expected text or json", other))),
    };

    let config = Self {
      server_host,
      server_port,
      database_url,
      kafka_brokers,
      kafka_topic,
      deadlines,
      log_format,
    };
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<()> {
    if self.server_host.is_empty() {
      return Err(AppError::Config("SERVER_HOST is required".to_string()));
    }
    if self.database_url.is_empty() {
      return Err(AppError::Config("DATABASE_URL is required".to_string()));
    }
    if self.kafka_brokers.is_empty() {
      return Err(AppError::Config("KAFKA_BROKERS is required".to_string()));
    }
    if self.kafka_topic.is_empty() {
      return Err(AppError::Config("KAFKA_TOPIC is required".to_string()));
    }
    let Deadlines {
      store,
      store_scan,
      publish,
    } = self.deadlines;
    if store.is_zero() || store_scan.is_zero() || publish.is_zero() {
      return Err(AppError::Config("timeouts must be at least one second".to_string()));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    AppConfig::from_lookup(|key| vars.get(key).cloned())
  }

  #[test]
  fn defaults_apply_when_nothing_is_set() {
    let config = config_from(&[]).unwrap();
    assert_eq!(config.server_port, 8080);
    assert_eq!(config.kafka_brokers, vec!["localhost:9092"]);
    assert_eq!(config.kafka_topic, "jar-events");
    assert_eq!(config.deadlines, Deadlines::default());
    assert_eq!(config.log_format, LogFormat::Text);
  }

  #[test]
  fn brokers_are_split_on_commas() {
    let config = config_from(&[("KAFKA_BROKERS", "k1:9092, k2:9092,,k3:9092")]).unwrap();
    assert_eq!(config.kafka_brokers, vec!["k1:9092", "k2:9092", "k3:9092"]);
  }

  #[test]
  fn empty_values_fall_back_to_defaults() {
    let config = config_from(&[("KAFKA_TOPIC", ""), ("SERVER_PORT", "  ")]).unwrap();
    assert_eq!(config.kafka_topic, "jar-events");
    assert_eq!(config.server_port, 8080);
  }

  #[test]
  fn timeouts_are_read_in_seconds() {
    let config = config_from(&[("STORE_TIMEOUT_SECS", "2"), ("PUBLISH_TIMEOUT_SECS", "7")]).unwrap();
    assert_eq!(config.deadlines.store, Duration::from_secs(2));
    assert_eq!(config.deadlines.store_scan, Duration::from_secs(10));
    assert_eq!(config.deadlines.publish, Duration::from_secs(7));
  }

  #[test]
  fn invalid_values_are_fatal() {
    assert!(matches!(config_from(&[("SERVER_PORT", "eighty")]), Err(AppError::Config(_))));
    assert!(matches!(config_from(&[("KAFKA_BROKERS", ",,")]), Err(AppError::Config(_))));
    assert!(matches!(config_from(&[("STORE_TIMEOUT_SECS", "0")]), Err(AppError::Config(_))));
    assert!(matches!(config_from(&[("LOG_FORMAT", "xml")]), Err(AppError::Config(_))));
  }
}
