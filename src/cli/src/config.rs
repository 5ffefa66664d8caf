//! Demo configuration loading and validation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Complete demo configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub api: ApiSection,

    #[serde(default)]
    pub buckets: BucketsSection,

    #[serde(default)]
    pub write: WriteSection,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSection {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BucketsSection {
    #[serde(default = "default_input_retention")]
    pub input_retention_hours: u64,
    #[serde(default = "default_output_retention")]
    pub output_retention_hours: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WriteSection {
    #[serde(default = "default_write_interval")]
    pub interval_ms: u64,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for BucketsSection {
    fn default() -> Self {
        Self {
            input_retention_hours: default_input_retention(),
            output_retention_hours: default_output_retention(),
        }
    }
}

impl Default for WriteSection {
    fn default() -> Self {
        Self {
            interval_ms: default_write_interval(),
        }
    }
}

/// Longest bucket retention accepted, about one hundred years
pub const MAX_RETENTION_HOURS: u64 = 100 * 366 * 24;

fn hours(n: u64) -> Duration {
    Duration::from_secs(n.saturating_mul(3600))
}

// Default value functions
fn default_endpoint() -> String { "http://localhost:9999".to_string() }
fn default_user_agent() -> String { "platdemo".to_string() }
fn default_timeout() -> u64 { 30 }
fn default_input_retention() -> u64 { 1 }
fn default_output_retention() -> u64 { 24 }
fn default_write_interval() -> u64 { 100 }

impl DemoConfig {
    /// Load configuration from TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read configuration file {:?}", path.as_ref()))?;

        let config: DemoConfig =
            toml::from_str(&contents).context("Failed to parse configuration file")?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.endpoint.trim().is_empty() {
            anyhow::bail!("API endpoint must not be empty");
        }

        if self.api.timeout_secs == 0 {
            anyhow::bail!("API timeout must be at least one second");
        }

        for retention_hours in [
            self.buckets.input_retention_hours,
            self.buckets.output_retention_hours,
        ] {
            if retention_hours == 0 {
                anyhow::bail!("Bucket retention must be at least one hour");
            }
            if retention_hours > MAX_RETENTION_HOURS {
                anyhow::bail!(
                    "Bucket retention of {} hours exceeds the maximum of {}",
                    retention_hours,
                    MAX_RETENTION_HOURS
                );
            }
        }

        if self.write.interval_ms == 0 {
            anyhow::bail!("Write interval must be at least one millisecond");
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn input_retention(&self) -> Duration {
        hours(self.buckets.input_retention_hours)
    }

    pub fn output_retention(&self) -> Duration {
        hours(self.buckets.output_retention_hours)
    }

    pub fn write_interval(&self) -> Duration {
        Duration::from_millis(self.write.interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = DemoConfig::default();
        assert_eq!(config.api.endpoint, "http://localhost:9999");
        assert_eq!(config.input_retention(), Duration::from_secs(3600));
        assert_eq!(config.output_retention(), Duration::from_secs(24 * 3600));
        assert_eq!(config.write_interval(), Duration::from_millis(100));
        config.validate().unwrap();
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[api]
endpoint = "https://platform.example.com"

[write]
interval_ms = 250
"#
        )
        .unwrap();

        let config = DemoConfig::load(file.path()).unwrap();
        assert_eq!(config.api.endpoint, "https://platform.example.com");
        assert_eq!(config.api.user_agent, "platdemo");
        assert_eq!(config.write.interval_ms, 250);
        assert_eq!(config.buckets.output_retention_hours, 24);
        config.validate().unwrap();
    }

    #[test]
    fn test_load_errors() {
        assert!(DemoConfig::load("/nonexistent/platdemo.toml").is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nendpoint = ").unwrap();
        assert!(DemoConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let mut config = DemoConfig::default();
        config.write.interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = DemoConfig::default();
        config.buckets.input_retention_hours = 0;
        assert!(config.validate().is_err());

        let mut config = DemoConfig::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_retention() {
        let mut config = DemoConfig::default();
        config.buckets.input_retention_hours = u64::MAX / 1000;
        assert!(config.validate().is_err());
        // Out-of-range values never overflow even when validation is skipped
        assert_eq!(config.input_retention(), Duration::from_secs(u64::MAX));

        let mut config = DemoConfig::default();
        config.buckets.output_retention_hours = MAX_RETENTION_HOURS + 1;
        assert!(config.validate().is_err());

        config.buckets.output_retention_hours = MAX_RETENTION_HOURS;
        config.validate().unwrap();
        assert_eq!(
            config.output_retention(),
            Duration::from_secs(MAX_RETENTION_HOURS * 3600)
        );
    }
}
