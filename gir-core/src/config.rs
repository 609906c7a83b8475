//! Graph container configuration
//!
//! Settings can be built in code or loaded from JSON; missing fields fall
//! back to their defaults.

use gir_common::GraphError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How `Graph::unlink` treats repeated edges between the same endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovePolicy {
    /// Drop one occurrence per call
    #[default]
    First,
    /// Drop every occurrence
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub remove_policy: RemovePolicy,
    /// When false, linking an existing edge again does nothing
    pub allow_duplicate_edges: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            remove_policy: RemovePolicy::First,
            allow_duplicate_edges: true,
        }
    }
}

impl GraphConfig {
    pub fn from_json(text: &str) -> Result<Self, GraphError> {
        serde_json::from_str(text).map_err(|e| GraphError::ConfigError {
            message: e.to_string(),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, GraphError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = GraphConfig::default();
        assert_eq!(config.remove_policy, RemovePolicy::First);
        assert!(config.allow_duplicate_edges);
    }

    #[test]
    fn test_from_json() {
        let config = GraphConfig::from_json(r#"{"remove_policy": "all"}"#).unwrap();
        assert_eq!(
            config,
            GraphConfig {
                remove_policy: RemovePolicy::All,
                allow_duplicate_edges: true,
            }
        );

        let config = GraphConfig::from_json("{}").unwrap();
        assert_eq!(config, GraphConfig::default());
    }

    #[test]
    fn test_from_json_rejects_unknown_policy() {
        let err = GraphConfig::from_json(r#"{"remove_policy": "some"}"#).unwrap_err();
        assert!(matches!(err, GraphError::ConfigError { .. }));
    }

    #[test]
    fn test_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"remove_policy": "all", "allow_duplicate_edges": false}}"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = GraphConfig::from_file(file.path()).unwrap();
        assert_eq!(
            config,
            GraphConfig {
                remove_policy: RemovePolicy::All,
                allow_duplicate_edges: false,
            }
        );
    }

    #[test]
    fn test_from_file_with_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"remove_policy = all").unwrap();

        let err = GraphConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, GraphError::ConfigError { .. }));
    }

    #[test]
    fn test_from_missing_file() {
        let err = GraphConfig::from_file(Path::new("/nonexistent/graph.json")).unwrap_err();
        assert!(matches!(err, GraphError::IoError { .. }));
    }
}
