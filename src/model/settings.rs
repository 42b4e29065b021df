use crate::model::{Result, StatsError};
use serde_json::{from_str, Value};
use std::fs;
use std::path::Path;
use std::time::Duration;

const LOG_TARGET: &str = "settings";

pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 604_800;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Settings {
    pub username: Option<String>,
    pub endpoint: String,
    pub cache_ttl: Duration,
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            username: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

// Create
impl Settings {
    /// Reads settings from a JSON file; a missing file yields the defaults.
    pub fn from_config(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!(target: LOG_TARGET, "Settings file `{}` not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let json_str = fs::read_to_string(path)?;
        Self::parse(&json_str)
    }

    pub fn with_username(mut self, username: Option<String>) -> Self {
        if username.is_some() {
            self.username = username;
        }
        self
    }
}

// Parser
impl Settings {
    fn parse(json_str: &str) -> Result<Self> {
        let details: Value = from_str(json_str)?;
        if !details.is_object() {
            return Err(StatsError::Settings("expected a JSON object".into()));
        }
        let mut settings = Self::default();

        match &details["username"] {
            Value::Null => {}
            Value::String(username) => settings.username = Some(username.clone()),
            _ => return Err(StatsError::Settings("'username' must be a string".into())),
        }
        match &details["endpoint"] {
            Value::Null => {}
            Value::String(endpoint) => settings.endpoint = endpoint.clone(),
            _ => return Err(StatsError::Settings("'endpoint' must be a string".into())),
        }
        if let Some(secs) = parse_secs(&details, "cache_ttl_secs")? {
            settings.cache_ttl = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_secs(&details, "timeout_secs")? {
            settings.timeout = Duration::from_secs(secs);
        }
        Ok(settings)
    }
}

fn parse_secs(details: &Value, field: &str) -> Result<Option<u64>> {
    match &details[field] {
        Value::Null => Ok(None),
        value => {
            let Some(secs) = value.as_u64() else {
                return Err(StatsError::Settings(format!(
                    "'{field}' must be a non-negative integer"
                )));
            };
            Ok(Some(secs))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::from_config(temp_dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.cache_ttl, Duration::from_secs(604_800));
    }

    #[test]
    fn file_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{ "username": "octocat", "cache_ttl_secs": 60, "timeout_secs": 5 }"#,
        )
        .unwrap();

        let settings = Settings::from_config(&path).unwrap();
        assert_eq!(settings.username.as_deref(), Some("octocat"));
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.cache_ttl, Duration::from_secs(60));
        assert_eq!(settings.timeout, Duration::from_secs(5));
    }

    #[test]
    fn invalid_field_type_is_rejected() {
        let err = Settings::parse(r#"{ "timeout_secs": "soon" }"#).unwrap_err();
        assert!(matches!(err, StatsError::Settings(_)));

        let err = Settings::parse(r#"[1, 2]"#).unwrap_err();
        assert!(matches!(err, StatsError::Settings(_)));
    }

    #[test]
    fn cli_username_wins() {
        let settings = Settings::parse(r#"{ "username": "from-file" }"#)
            .unwrap()
            .with_username(Some("from-cli".to_string()));
        assert_eq!(settings.username.as_deref(), Some("from-cli"));

        let settings = Settings::parse(r#"{ "username": "from-file" }"#)
            .unwrap()
            .with_username(None);
        assert_eq!(settings.username.as_deref(), Some("from-file"));
    }
}
