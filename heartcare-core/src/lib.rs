//! # HeartCare Core
//!
//! Feature alignment and inference pipeline for heart-disease risk
//! assessment. Raw form fields are encoded into a sparse one-hot record,
//! aligned to the column list the model was trained on, scaled, and
//! classified into a binary [`RiskLabel`].
//!
//! Trained artifacts are loaded once into [`ModelArtifacts`] and shared
//! read-only; every assessment after that is a pure, infallible transform.

pub mod config;
pub mod error;
pub mod features;
pub mod input;
pub mod label;
pub mod model;
pub mod pipeline;
pub mod schema;

// Re-export commonly used types at the crate root.
pub use config::{ArtifactsConfig, HeartcareConfig, load_config};
pub use error::{HeartcareError, Result};
pub use features::{SparseFeatureRecord, encode};
pub use input::{
    Category, ChestPainType, ExerciseAngina, RawAssessmentInput, RestingEcg, Selection, Sex,
    StSlope,
};
pub use label::RiskLabel;
pub use model::{ArtifactPaths, ModelArtifacts};
pub use pipeline::{Assessment, RiskPipeline};
pub use schema::{AlignedFeatureVector, ExpectedColumnSchema, align};
