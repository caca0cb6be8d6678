//! Binary classifiers fitted at training time.
//!
//! Class labels are 0 (low risk) and 1 (high risk); artifacts carrying any
//! other label are rejected when they load.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A fitted binary decision function over scaled features.
pub trait Classifier: Send + Sync + fmt::Debug {
    fn kind(&self) -> &str;

    /// Number of features the classifier was fitted on.
    fn n_features(&self) -> usize;

    /// Predict the class (0 or 1) of one scaled sample.
    fn predict(&self, features: &[f64]) -> u8;
}

/// Classifier artifact as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    KNearestNeighbors(KNearestNeighbors),
    LogisticRegression(LogisticRegression),
}

impl ClassifierArtifact {
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::KNearestNeighbors(m) => m.validate(),
            Self::LogisticRegression(m) => m.validate(),
        }
    }
}

impl Classifier for ClassifierArtifact {
    fn kind(&self) -> &str {
        match self {
            Self::KNearestNeighbors(_) => "k_nearest_neighbors",
            Self::LogisticRegression(_) => "logistic_regression",
        }
    }

    fn n_features(&self) -> usize {
        match self {
            Self::KNearestNeighbors(m) => m.n_features(),
            Self::LogisticRegression(m) => m.coef.len(),
        }
    }

    fn predict(&self, features: &[f64]) -> u8 {
        match self {
            Self::KNearestNeighbors(m) => m.predict(features),
            Self::LogisticRegression(m) => m.predict(features),
        }
    }
}

/// How neighbour votes are weighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborWeights {
    #[default]
    Uniform,
    /// Inverse distance; an exact match decides alone.
    Distance,
}

/// Distance between two samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum DistanceMetric {
    #[default]
    Euclidean,
    Manhattan,
    Minkowski {
        p: f64,
    },
}

impl DistanceMetric {
    pub fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        let diffs = a.iter().zip(b).map(|(x, y)| (x - y).abs());
        match self {
            Self::Euclidean => diffs.map(|d| d * d).sum::<f64>().sqrt(),
            Self::Manhattan => diffs.sum(),
            Self::Minkowski { p } => diffs.map(|d| d.powf(*p)).sum::<f64>().powf(1.0 / p),
        }
    }
}

/// k-nearest-neighbours vote over the stored (already scaled) training set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KNearestNeighbors {
    pub n_neighbors: usize,
    #[serde(default)]
    pub weights: NeighborWeights,
    #[serde(default)]
    pub metric: DistanceMetric,
    /// Training samples, one row per sample.
    pub fit_x: Vec<Vec<f64>>,
    /// Class of each training sample.
    pub fit_y: Vec<u8>,
}

impl KNearestNeighbors {
    pub fn n_features(&self) -> usize {
        self.fit_x.first().map_or(0, Vec::len)
    }

    fn validate(&self) -> Result<(), String> {
        if self.fit_x.is_empty() {
            return Err("`fit_x` is empty".into());
        }
        if self.fit_x.len() != self.fit_y.len() {
            return Err(format!(
                "`fit_x` has {} rows but `fit_y` has {} labels",
                self.fit_x.len(),
                self.fit_y.len()
            ));
        }
        if self.n_neighbors == 0 || self.n_neighbors > self.fit_x.len() {
            return Err(format!(
                "`n_neighbors` must be in 1..={}, got {}",
                self.fit_x.len(),
                self.n_neighbors
            ));
        }
        let width = self.n_features();
        if let Some(row) = self.fit_x.iter().position(|r| r.len() != width) {
            return Err(format!("row {row} of `fit_x` does not have {width} features"));
        }
        if self.fit_x.iter().flatten().any(|v| !v.is_finite()) {
            return Err("`fit_x` contains a non-finite value".into());
        }
        if let Some(label) = self.fit_y.iter().find(|&&y| y > 1) {
            return Err(format!("label {label} is not a binary class"));
        }
        if let DistanceMetric::Minkowski { p } = self.metric {
            if !(p.is_finite() && p >= 1.0) {
                return Err(format!("minkowski `p` must be >= 1, got {p}"));
            }
        }
        Ok(())
    }

    /// Majority (or inverse-distance weighted) vote of the `n_neighbors`
    /// closest samples. Ties go to class 0. Under distance weighting, any
    /// zero-distance neighbours vote alone with equal weight.
    pub fn predict(&self, features: &[f64]) -> u8 {
        let mut neighbors: Vec<(f64, u8)> = self
            .fit_x
            .iter()
            .zip(&self.fit_y)
            .map(|(row, &label)| (self.metric.distance(features, row), label))
            .collect();
        neighbors.sort_by(|a, b| a.0.total_cmp(&b.0));
        neighbors.truncate(self.n_neighbors);

        let mut votes = [0.0_f64; 2];
        match self.weights {
            NeighborWeights::Uniform => {
                for &(_, label) in &neighbors {
                    votes[usize::from(label)] += 1.0;
                }
            }
            NeighborWeights::Distance => {
                // Exact matches carry all the weight and vote among themselves.
                let exact_match = neighbors.iter().any(|&(d, _)| d == 0.0);
                for &(distance, label) in &neighbors {
                    votes[usize::from(label)] += match (exact_match, distance == 0.0) {
                        (false, _) => 1.0 / distance,
                        (true, true) => 1.0,
                        (true, false) => 0.0,
                    };
                }
            }
        }

        u8::from(votes[1] > votes[0])
    }
}

/// Linear decision function: class 1 when `coef · x + intercept > 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub coef: Vec<f64>,
    pub intercept: f64,
}

impl LogisticRegression {
    fn validate(&self) -> Result<(), String> {
        if self.coef.is_empty() {
            return Err("`coef` is empty".into());
        }
        if !self.intercept.is_finite() || self.coef.iter().any(|c| !c.is_finite()) {
            return Err("non-finite coefficient".into());
        }
        Ok(())
    }

    pub fn decision(&self, features: &[f64]) -> f64 {
        self.coef
            .iter()
            .zip(features)
            .map(|(c, x)| c * x)
            .sum::<f64>()
            + self.intercept
    }

    pub fn predict(&self, features: &[f64]) -> u8 {
        u8::from(self.decision(features) > 0.0)
    }
}
