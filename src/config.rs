use crate::error::ScannerError;
use log::warn;
use std::env;
use std::str::FromStr;
use validator::Validate;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_HEALTHY_LIMIT: u32 = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Validate)]
pub struct ScannerConfig {
    #[validate(url)]
    pub api_url: String,
    #[validate(range(min = 1, max = 50))]
    pub healthy_limit: u32,
    #[validate(range(min = 1, max = 600))]
    pub timeout_secs: u64,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            healthy_limit: DEFAULT_HEALTHY_LIMIT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ScannerConfig {
    pub fn from_env() -> Result<Self, ScannerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, falling back to defaults for unset or
    /// unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScannerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("FOOD_API_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let config = Self {
            api_url,
            healthy_limit: parse_or(&lookup, "FOOD_HEALTHY_LIMIT", DEFAULT_HEALTHY_LIMIT),
            timeout_secs: parse_or(&lookup, "FOOD_API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
        };
        config.check()?;
        Ok(config)
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Result<Self, ScannerError> {
        self.api_url = api_url.into();
        self.check()?;
        Ok(self)
    }

    pub fn with_healthy_limit(mut self, limit: u32) -> Result<Self, ScannerError> {
        self.healthy_limit = limit;
        self.check()?;
        Ok(self)
    }

    fn check(&self) -> Result<(), ScannerError> {
        self.validate()
            .map_err(|e| ScannerError::Config(e.to_string()))
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid {} value '{}', using default", key, raw);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ScannerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.healthy_limit, 5);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_reads_overrides() {
        let config = ScannerConfig::from_lookup(lookup(&[
            ("FOOD_API_URL", "http://scanner.local:8080"),
            ("FOOD_HEALTHY_LIMIT", "8"),
            ("FOOD_API_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "http://scanner.local:8080");
        assert_eq!(config.healthy_limit, 8);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_unparsable_number_falls_back() {
        let config =
            ScannerConfig::from_lookup(lookup(&[("FOOD_HEALTHY_LIMIT", "lots")])).unwrap();
        assert_eq!(config.healthy_limit, DEFAULT_HEALTHY_LIMIT);
    }

    #[test]
    fn test_rejects_invalid_url() {
        let result = ScannerConfig::from_lookup(lookup(&[("FOOD_API_URL", "not a url")]));
        assert!(matches!(result, Err(ScannerError::Config(_))));
    }

    #[test]
    fn test_rejects_out_of_range_limit() {
        let result = ScannerConfig::default().with_healthy_limit(0);
        assert!(result.is_err());
        assert!(ScannerConfig::default().with_healthy_limit(10).is_ok());
    }
}
