use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://reqres.in/api";
pub const DEFAULT_API_KEY_HEADER: &str = "x-api-key";
pub const DEFAULT_API_KEY: &str = "reqres-free-v1";

/// Everything a suite run needs: where to send requests and the fixture
/// values the cases are built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuiteConfig {
    pub base_url: String,
    pub api_key_header: String,
    pub api_key: String,
    pub login_email: String,
    pub login_password: String,
    pub create_name: String,
    pub create_job: String,
    pub users_page: u32,
    pub user_id_to_delete: u32,
    pub timeout_ms: Option<u64>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key_header: DEFAULT_API_KEY_HEADER.into(),
            api_key: DEFAULT_API_KEY.into(),
            login_email: "eve.holt@reqres.in".into(),
            login_password: "cityslicka".into(),
            create_name: "John Doe".into(),
            create_job: "QA Tester".into(),
            users_page: 2,
            user_id_to_delete: 2,
            timeout_ms: None,
        }
    }
}

impl SuiteConfig {
    /// Load a JSON config file. Fields missing from the file keep their
    /// defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Headers attached to every request of the run.
    pub fn default_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert(self.api_key_header.clone(), self.api_key.clone());
        headers
    }

    /// Values available to `{{name}}` placeholders in request templates.
    pub fn variables(&self) -> HashMap<String, String> {
        let mut vars = HashMap::new();
        vars.insert("usersPage".to_string(), self.users_page.to_string());
        vars.insert("userIdToDelete".to_string(), self.user_id_to_delete.to_string());
        vars
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_reqres_fixtures() {
        let config = SuiteConfig::default();
        assert_eq!(config.base_url, "https://reqres.in/api");
        assert_eq!(config.default_headers().get("x-api-key").unwrap(), "reqres-free-v1");
        assert_eq!(config.variables().get("usersPage").unwrap(), "2");
        assert_eq!(config.variables().get("userIdToDelete").unwrap(), "2");
        assert!(config.timeout().is_none());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"baseUrl": "http://localhost:9000/api", "usersPage": 3}}"#).unwrap();

        let config = SuiteConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "http://localhost:9000/api");
        assert_eq!(config.users_page, 3);
        assert_eq!(config.login_email, "eve.holt@reqres.in");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = SuiteConfig::from_file(Path::new("/nonexistent/suite.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = SuiteConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
