//! Schema aligner.
//!
//! Alignment is total: every schema column gets a value (the record's, or 0)
//! and any record key the schema does not know is dropped. Drops are not
//! errors; they are logged and returned in the [`AlignmentReport`].

use crate::features::SparseFeatureRecord;
use crate::schema::ExpectedColumnSchema;
use serde::Serialize;
use tracing::warn;

/// One value per schema column, in schema order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AlignedFeatureVector(Vec<f64>);

impl AlignedFeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl AsRef<[f64]> for AlignedFeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Aligned vector plus the record keys that were discarded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentReport {
    pub vector: AlignedFeatureVector,
    /// Record keys absent from the schema, in key order.
    pub dropped: Vec<String>,
}

/// Align a sparse record to the schema.
pub fn align(sparse: &SparseFeatureRecord, schema: &ExpectedColumnSchema) -> AlignedFeatureVector {
    align_with_report(sparse, schema).vector
}

/// Align a sparse record to the schema and report dropped keys.
pub fn align_with_report(
    sparse: &SparseFeatureRecord,
    schema: &ExpectedColumnSchema,
) -> AlignmentReport {
    let values = schema
        .iter()
        .map(|column| sparse.get(column).unwrap_or(0.0))
        .collect();

    let dropped: Vec<String> = sparse
        .keys()
        .filter(|key| !schema.contains(key))
        .map(str::to_string)
        .collect();
    for key in &dropped {
        warn!(feature = %key, "feature not in expected column schema, dropped");
    }

    AlignmentReport {
        vector: AlignedFeatureVector(values),
        dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn schema(columns: &[&str]) -> ExpectedColumnSchema {
        ExpectedColumnSchema::new(columns.iter().map(|c| c.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_align_follows_schema_order_and_zero_fills() {
        let mut record = SparseFeatureRecord::new();
        record.insert("Age", 61.0);
        record.insert("Sex_F", 1.0);

        let vector = align(&record, &schema(&["Sex_M", "Sex_F", "Oldpeak", "Age"]));
        assert_eq!(vector.as_slice(), &[0.0, 1.0, 0.0, 61.0]);
    }

    #[test]
    fn test_align_reports_dropped_keys() {
        let mut record = SparseFeatureRecord::new();
        record.insert("Age", 61.0);
        record.insert("ChestPainType_XYZ", 1.0);
        record.insert("Sex_F", 1.0);

        let report = align_with_report(&record, &schema(&["Age", "Sex_M"]));
        assert_eq!(report.vector.as_slice(), &[61.0, 0.0]);
        assert_eq!(report.dropped, vec!["ChestPainType_XYZ", "Sex_F"]);
    }

    #[test]
    fn test_align_empty_record_is_all_zero() {
        let vector = align(&SparseFeatureRecord::new(), &schema(&["Age", "MaxHR"]));
        assert_eq!(vector.into_inner(), vec![0.0, 0.0]);
    }
}
