//! Client configuration
//!
//! Loaded from YAML (or built in code). Every field has a default, so an
//! empty document is a valid configuration.
//!
//! ```yaml
//! max_pages: 500
//! unauthorized_policy: strict
//! http:
//!   timeout_secs: 10
//!   user_agent: my-app/1.0
//! endpoints:
//!   courseExams:
//!     endpoint: /api/v1/courses/{courseId}/quizzes
//!     method: GET
//! ```

use crate::auth::UnauthorizedPolicy;
use crate::catalog::{Endpoint, EndpointCatalog, Operation};
use crate::error::{Error, Result, ResultExt};
use crate::http::TransportConfig;
use crate::pagination::DEFAULT_MAX_PAGES;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Configuration for [`crate::client::LmsClient`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Maximum pages one collection may fetch
    pub max_pages: usize,

    /// Which 401 responses trigger a token refresh
    pub unauthorized_policy: UnauthorizedPolicy,

    /// HTTP transport settings
    pub http: TransportConfig,

    /// Endpoint overrides, keyed by operation name
    pub endpoints: HashMap<Operation, Endpoint>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            unauthorized_policy: UnauthorizedPolicy::default(),
            http: TransportConfig::default(),
            endpoints: HashMap::new(),
        }
    }
}

impl ClientConfig {
    /// Parse configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::config(format!("File not found: {}", path.display())));
        }
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml_str(&yaml)
    }

    /// Check invariants serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.max_pages == 0 {
            return Err(Error::config("max_pages must be at least 1"));
        }
        for (op, endpoint) in &self.endpoints {
            if endpoint.endpoint.trim().is_empty() {
                return Err(Error::config(format!("endpoint for '{op}' is empty")));
            }
        }
        Ok(())
    }

    /// Endpoint catalog with the configured overrides applied
    pub fn catalog(&self) -> EndpointCatalog {
        EndpointCatalog::with_overrides(&self.endpoints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Method;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = ClientConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.max_pages, 1000);
        assert_eq!(config.unauthorized_policy, UnauthorizedPolicy::Lenient);
        assert_eq!(config.http.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r"
max_pages: 50
unauthorized_policy: strict
http:
  timeout_secs: 5
  user_agent: test-agent/1.0
  default_headers:
    X-Trace: abc
endpoints:
  courseExams:
    endpoint: /api/v2/courses/{courseId}/exams
    method: GET
";
        let config = ClientConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.max_pages, 50);
        assert_eq!(config.unauthorized_policy, UnauthorizedPolicy::Strict);
        assert_eq!(config.http.timeout, Duration::from_secs(5));
        assert_eq!(config.http.user_agent, "test-agent/1.0");
        assert_eq!(
            config.http.default_headers.get("X-Trace"),
            Some(&"abc".to_string())
        );

        let catalog = config.catalog();
        assert_eq!(
            catalog.get(Operation::CourseExams),
            &Endpoint::new(Method::GET, "/api/v2/courses/{courseId}/exams")
        );
    }

    #[test]
    fn test_zero_max_pages_rejected() {
        let err = ClientConfig::from_yaml_str("max_pages: 0").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_unknown_operation_rejected() {
        let yaml = "endpoints:\n  deleteEverything:\n    endpoint: /x\n";
        let err = ClientConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_pages: 7").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.max_pages, 7);
    }

    #[test]
    fn test_from_missing_file() {
        let err = ClientConfig::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_from_unreadable_path() {
        let dir = tempfile::tempdir().unwrap();

        let err = ClientConfig::from_file(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Other(ref message) if message.starts_with("Failed to read")));
    }
}
