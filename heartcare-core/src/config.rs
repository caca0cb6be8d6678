//! Configuration system for HeartCare.
//!
//! Uses `figment` for layered configuration: defaults -> config file -> environment -> overrides.
//! Configuration is loaded from `~/.config/heartcare/config.toml` and/or `.heartcare/config.toml`
//! in the workspace directory.

use crate::error::{HeartcareError, Result};
use crate::model::ArtifactPaths;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeartcareConfig {
    /// Trained artifact locations and checks.
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
}

/// Where the trained artifacts live and how strictly they are checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    /// Directory holding the artifact files. Relative paths resolve against the workspace.
    #[serde(default = "default_artifact_dir")]
    pub dir: PathBuf,
    /// Classifier file name.
    #[serde(default = "default_model_file")]
    pub model_file: String,
    /// Scaler file name.
    #[serde(default = "default_scaler_file")]
    pub scaler_file: String,
    /// Expected-column list file name.
    #[serde(default = "default_columns_file")]
    pub columns_file: String,
    /// Refuse to start when a catalog column is missing from the schema.
    #[serde(default)]
    pub strict_catalog: bool,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: default_artifact_dir(),
            model_file: default_model_file(),
            scaler_file: default_scaler_file(),
            columns_file: default_columns_file(),
            strict_catalog: false,
        }
    }
}

impl ArtifactsConfig {
    /// Resolve the artifact files against `base`. An absolute `dir` ignores `base`.
    pub fn paths(&self, base: &Path) -> ArtifactPaths {
        let dir = base.join(&self.dir);
        ArtifactPaths {
            model: dir.join(&self.model_file),
            scaler: dir.join(&self.scaler_file),
            columns: dir.join(&self.columns_file),
        }
    }
}

fn default_artifact_dir() -> PathBuf {
    PathBuf::from("artifacts")
}

fn default_model_file() -> String {
    "knn_heart_model.json".to_string()
}

fn default_scaler_file() -> String {
    "heart_scaler.json".to_string()
}

fn default_columns_file() -> String {
    "heart_columns.json".to_string()
}

/// Resolve the effective configuration. Later layers win: built-in defaults,
/// the user's `config.toml`, the workspace's `.heartcare/config.toml`,
/// `config_file`, `HEARTCARE_*` variables, then `overrides`.
///
/// A `config_file` that does not exist is an error; the implicit files are
/// skipped when absent.
pub fn load_config(
    workspace: Option<&Path>,
    config_file: Option<&Path>,
    overrides: Option<&HeartcareConfig>,
) -> Result<HeartcareConfig> {
    if let Some(path) = config_file.filter(|p| !p.exists()) {
        let missing = figment::Error::from(format!("config file not found: {}", path.display()));
        return Err(Box::new(missing).into());
    }

    let user_file = directories::ProjectDirs::from("dev", "heartcare", "heartcare")
        .map(|dirs| dirs.config_dir().join("config.toml"));
    let workspace_file = workspace.map(|ws| ws.join(".heartcare").join("config.toml"));

    let mut figment = [user_file, workspace_file]
        .into_iter()
        .flatten()
        .filter(|file| file.exists())
        .fold(
            Figment::from(Serialized::defaults(HeartcareConfig::default())),
            |figment, file| figment.merge(Toml::file(file)),
        );
    if let Some(path) = config_file {
        figment = figment.merge(Toml::file(path));
    }

    // HEARTCARE_ARTIFACTS__STRICT_CATALOG=true -> artifacts.strict_catalog
    figment = figment.merge(Env::prefixed("HEARTCARE_").split("__"));
    if let Some(overrides) = overrides {
        figment = figment.merge(Serialized::defaults(overrides));
    }

    figment
        .extract()
        .map_err(|e| HeartcareError::from(Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HeartcareConfig::default();
        assert_eq!(config.artifacts.dir, PathBuf::from("artifacts"));
        assert_eq!(config.artifacts.model_file, "knn_heart_model.json");
        assert_eq!(config.artifacts.columns_file, "heart_columns.json");
        assert!(!config.artifacts.strict_catalog);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = HeartcareConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: HeartcareConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: HeartcareConfig = toml::from_str(
            r#"
[artifacts]
strict_catalog = true
"#,
        )
        .unwrap();
        assert!(config.artifacts.strict_catalog);
        assert_eq!(config.artifacts.scaler_file, "heart_scaler.json");
    }

    #[test]
    fn test_paths_resolve_against_base() {
        let config = ArtifactsConfig::default();
        let paths = config.paths(Path::new("/srv/heartcare"));
        assert_eq!(
            paths.model,
            PathBuf::from("/srv/heartcare/artifacts/knn_heart_model.json")
        );
        assert_eq!(
            paths.columns,
            PathBuf::from("/srv/heartcare/artifacts/heart_columns.json")
        );
    }

    #[test]
    fn test_paths_absolute_dir_ignores_base() {
        let config = ArtifactsConfig {
            dir: PathBuf::from("/opt/models"),
            ..Default::default()
        };
        let paths = config.paths(Path::new("/srv/heartcare"));
        assert_eq!(paths.scaler, PathBuf::from("/opt/models/heart_scaler.json"));
    }

    #[test]
    fn test_load_config_from_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let heartcare_dir = dir.path().join(".heartcare");
        std::fs::create_dir_all(&heartcare_dir).unwrap();
        std::fs::write(
            heartcare_dir.join("config.toml"),
            r#"
[artifacts]
dir = "models/v2"
model_file = "model.json"
"#,
        )
        .unwrap();

        let config = load_config(Some(dir.path()), None, None).unwrap();
        assert_eq!(config.artifacts.dir, PathBuf::from("models/v2"));
        assert_eq!(config.artifacts.model_file, "model.json");
        assert_eq!(config.artifacts.scaler_file, "heart_scaler.json");
    }

    #[test]
    fn test_load_config_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("heartcare.toml");
        std::fs::write(&file, "[artifacts]\ncolumns_file = \"columns.json\"\n").unwrap();

        let config = load_config(None, Some(&file), None).unwrap();
        assert_eq!(config.artifacts.columns_file, "columns.json");
    }

    #[test]
    fn test_load_config_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(None, Some(&dir.path().join("absent.toml")), None).unwrap_err();
        assert!(matches!(err, HeartcareError::Config(_)));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn test_load_config_invalid_value_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("heartcare.toml");
        std::fs::write(&file, "[artifacts]\nstrict_catalog = \"sometimes\"\n").unwrap();

        let err = load_config(None, Some(&file), None).unwrap_err();
        assert!(matches!(err, HeartcareError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error: "));
    }

    #[test]
    fn test_load_config_with_overrides() {
        let mut overrides = HeartcareConfig::default();
        overrides.artifacts.strict_catalog = true;

        let config = load_config(None, None, Some(&overrides)).unwrap();
        assert!(config.artifacts.strict_catalog);
    }
}
