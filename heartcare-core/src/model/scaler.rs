//! Feature scalers fitted at training time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A fitted, deterministic per-feature transform.
pub trait Scaler: Send + Sync + fmt::Debug {
    fn kind(&self) -> &str;

    /// Number of features the scaler was fitted on.
    fn n_features(&self) -> usize;

    /// Scale one sample. The output has the same length as the input.
    fn transform(&self, features: &[f64]) -> Vec<f64>;
}

/// Scaler artifact as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerArtifact {
    Standard(StandardScaler),
    MinMax(MinMaxScaler),
}

impl ScalerArtifact {
    /// Check internal consistency of the fitted parameters.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Standard(s) => check_params("mean", &s.mean, "scale", &s.scale),
            Self::MinMax(s) => check_params("min", &s.min, "scale", &s.scale),
        }
    }
}

impl Scaler for ScalerArtifact {
    fn kind(&self) -> &str {
        match self {
            Self::Standard(_) => "standard",
            Self::MinMax(_) => "min_max",
        }
    }

    fn n_features(&self) -> usize {
        match self {
            Self::Standard(s) => s.n_features(),
            Self::MinMax(s) => s.n_features(),
        }
    }

    fn transform(&self, features: &[f64]) -> Vec<f64> {
        match self {
            Self::Standard(s) => s.transform(features),
            Self::MinMax(s) => s.transform(features),
        }
    }
}

fn check_params(a_name: &str, a: &[f64], b_name: &str, b: &[f64]) -> Result<(), String> {
    if a.is_empty() {
        return Err(format!("`{a_name}` is empty"));
    }
    if a.len() != b.len() {
        return Err(format!(
            "`{a_name}` has {} entries but `{b_name}` has {}",
            a.len(),
            b.len()
        ));
    }
    if let Some(i) = a.iter().chain(b).position(|v| !v.is_finite()) {
        return Err(format!("non-finite parameter at flat index {i}"));
    }
    Ok(())
}

/// Standardization: `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    pub fn transform(&self, features: &[f64]) -> Vec<f64> {
        features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| {
                // Constant features are fitted with unit scale.
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (x - mean) / scale
            })
            .collect()
    }
}

/// Min-max scaling: `x * scale + min`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    pub min: Vec<f64>,
    pub scale: Vec<f64>,
}

impl MinMaxScaler {
    pub fn n_features(&self) -> usize {
        self.min.len()
    }

    pub fn transform(&self, features: &[f64]) -> Vec<f64> {
        features
            .iter()
            .zip(self.min.iter().zip(&self.scale))
            .map(|(x, (min, scale))| x * scale + min)
            .collect()
    }
}
