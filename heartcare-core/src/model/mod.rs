//! Scaler/classifier adapter over the externally trained artifacts.

pub mod artifacts;
pub mod classifier;
pub mod scaler;

pub use artifacts::{ArtifactPaths, ModelArtifacts};
pub use classifier::{
    Classifier, ClassifierArtifact, DistanceMetric, KNearestNeighbors, LogisticRegression,
    NeighborWeights,
};
pub use scaler::{MinMaxScaler, Scaler, ScalerArtifact, StandardScaler};
