//! The assessment pipeline: encode, align, scale, classify.

use crate::features::encode;
use crate::input::RawAssessmentInput;
use crate::label::RiskLabel;
use crate::model::ModelArtifacts;
use crate::schema::{AlignedFeatureVector, align_with_report};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Result of one assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    /// Correlates the assessment's log lines.
    pub id: Uuid,
    pub label: RiskLabel,
    /// Encoded features the schema did not contain.
    pub dropped_features: Vec<String>,
}

/// Stateless pipeline over shared, read-only artifacts.
///
/// Cloning is cheap and clones may be used from any number of threads.
#[derive(Debug, Clone)]
pub struct RiskPipeline {
    artifacts: Arc<ModelArtifacts>,
}

impl RiskPipeline {
    pub fn new(artifacts: Arc<ModelArtifacts>) -> Self {
        Self { artifacts }
    }

    pub fn artifacts(&self) -> &ModelArtifacts {
        &self.artifacts
    }

    /// Run one assessment end to end.
    pub fn assess(&self, raw: &RawAssessmentInput) -> Assessment {
        let id = Uuid::new_v4();
        let span = tracing::debug_span!("assessment", %id);
        let _enter = span.enter();

        let sparse = encode(raw);
        debug!(features = sparse.len(), "encoded input");

        let report = align_with_report(&sparse, self.artifacts.schema());
        let label = self.predict(&report.vector);
        debug!(
            label = label.as_str(),
            dropped = report.dropped.len(),
            "assessment complete"
        );

        Assessment {
            id,
            label,
            dropped_features: report.dropped,
        }
    }

    /// Scale an aligned vector and classify it.
    ///
    /// `vector` must come from aligning against this pipeline's own schema
    /// (see [`ModelArtifacts::schema`]); [`assess`](Self::assess) always
    /// satisfies this.
    ///
    /// # Panics
    ///
    /// Panics if `vector` does not have one value per schema column.
    pub fn predict(&self, vector: &AlignedFeatureVector) -> RiskLabel {
        let columns = self.artifacts.schema().len();
        assert_eq!(
            vector.len(),
            columns,
            "feature vector has {} values but the schema has {columns} columns",
            vector.len()
        );
        let scaled = self.artifacts.scaler().transform(vector.as_slice());
        RiskLabel::from_class(self.artifacts.classifier().predict(&scaled))
    }
}
