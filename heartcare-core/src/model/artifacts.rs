//! Loading of the trained artifacts: classifier, scaler and column list.
//!
//! Everything that can go wrong with the artifacts is detected here, before
//! the first assessment. A [`ModelArtifacts`] value is only constructed when
//! the three pieces agree on the feature dimension.

use crate::config::ArtifactsConfig;
use crate::error::{HeartcareError, Result};
use crate::features::catalog::{CatalogCoverage, check_coverage};
use crate::model::classifier::{Classifier, ClassifierArtifact};
use crate::model::scaler::{Scaler, ScalerArtifact};
use crate::schema::ExpectedColumnSchema;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File locations of the three artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
    pub columns: PathBuf,
}

/// Trained artifacts, immutable once loaded.
#[derive(Debug)]
pub struct ModelArtifacts {
    schema: ExpectedColumnSchema,
    scaler: Box<dyn Scaler>,
    classifier: Box<dyn Classifier>,
    coverage: CatalogCoverage,
}

impl ModelArtifacts {
    /// Assemble artifacts, checking that scaler and classifier were fitted
    /// on as many features as the schema lists.
    pub fn new(
        schema: ExpectedColumnSchema,
        scaler: Box<dyn Scaler>,
        classifier: Box<dyn Classifier>,
    ) -> Result<Self> {
        if scaler.n_features() != schema.len() {
            return Err(HeartcareError::schema(format!(
                "{} scaler expects {} features but the schema has {} columns",
                scaler.kind(),
                scaler.n_features(),
                schema.len()
            )));
        }
        if classifier.n_features() != schema.len() {
            return Err(HeartcareError::schema(format!(
                "{} classifier expects {} features but the schema has {} columns",
                classifier.kind(),
                classifier.n_features(),
                schema.len()
            )));
        }

        let coverage = check_coverage(&schema);
        for column in &coverage.missing_from_schema {
            warn!(column = %column, "catalog column missing from schema; selecting it drops the feature");
        }
        for column in &coverage.unknown_to_catalog {
            warn!(column = %column, "schema column is never produced by the encoder");
        }

        Ok(Self {
            schema,
            scaler,
            classifier,
            coverage,
        })
    }

    /// Load and validate the three artifact files.
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        let columns: Vec<String> = read_json(&paths.columns)?;
        let schema = ExpectedColumnSchema::new(columns)
            .map_err(|e| HeartcareError::artifact(&paths.columns, e.to_string()))?;

        let scaler: ScalerArtifact = read_json(&paths.scaler)?;
        scaler
            .validate()
            .map_err(|reason| HeartcareError::artifact(&paths.scaler, reason))?;

        let classifier: ClassifierArtifact = read_json(&paths.model)?;
        classifier
            .validate()
            .map_err(|reason| HeartcareError::artifact(&paths.model, reason))?;

        info!(
            columns = schema.len(),
            scaler = scaler.kind(),
            classifier = classifier.kind(),
            "Loaded model artifacts"
        );

        Self::new(schema, Box::new(scaler), Box::new(classifier))
    }

    /// Load from configuration, resolving relative paths against `base`.
    ///
    /// With `strict_catalog` set, any catalog column missing from the
    /// schema is an error instead of a warning.
    pub fn load_with_config(config: &ArtifactsConfig, base: &Path) -> Result<Self> {
        let artifacts = Self::load(&config.paths(base))?;
        if config.strict_catalog && !artifacts.coverage.missing_from_schema.is_empty() {
            return Err(HeartcareError::Catalog {
                missing: artifacts.coverage.missing_from_schema.clone(),
            });
        }
        Ok(artifacts)
    }

    pub fn schema(&self) -> &ExpectedColumnSchema {
        &self.schema
    }

    pub fn scaler(&self) -> &dyn Scaler {
        self.scaler.as_ref()
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn coverage(&self) -> &CatalogCoverage {
        &self.coverage
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        std::fs::read_to_string(path).map_err(|e| HeartcareError::artifact(path, e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| HeartcareError::artifact(path, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::classifier::LogisticRegression;
    use crate::model::scaler::StandardScaler;

    fn schema(n: usize) -> ExpectedColumnSchema {
        ExpectedColumnSchema::new((0..n).map(|i| format!("f{i}")).collect()).unwrap()
    }

    fn scaler(n: usize) -> Box<dyn Scaler> {
        Box::new(ScalerArtifact::Standard(StandardScaler {
            mean: vec![0.0; n],
            scale: vec![1.0; n],
        }))
    }

    fn classifier(n: usize) -> Box<dyn Classifier> {
        Box::new(ClassifierArtifact::LogisticRegression(LogisticRegression {
            coef: vec![1.0; n],
            intercept: 0.0,
        }))
    }

    #[test]
    fn test_new_accepts_matching_dimensions() {
        let artifacts = ModelArtifacts::new(schema(3), scaler(3), classifier(3)).unwrap();
        assert_eq!(artifacts.schema().len(), 3);
        assert_eq!(artifacts.scaler().kind(), "standard");
        assert_eq!(artifacts.coverage().unknown_to_catalog.len(), 3);
    }

    #[test]
    fn test_new_rejects_scaler_dimension_mismatch() {
        let err = ModelArtifacts::new(schema(3), scaler(2), classifier(3)).unwrap_err();
        assert!(err.to_string().contains("scaler expects 2 features"));
    }

    #[test]
    fn test_new_rejects_classifier_dimension_mismatch() {
        let err = ModelArtifacts::new(schema(3), scaler(3), classifier(4)).unwrap_err();
        assert!(err.to_string().contains("classifier expects 4 features"));
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths {
            model: dir.path().join("model.json"),
            scaler: dir.path().join("scaler.json"),
            columns: dir.path().join("columns.json"),
        };
        let err = ModelArtifacts::load(&paths).unwrap_err();
        match err {
            HeartcareError::Artifact { path, .. } => assert_eq!(path, paths.columns),
            other => panic!("unexpected error: {other}"),
        }
    }
}
