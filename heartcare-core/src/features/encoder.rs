//! Feature encoder.

use crate::features::catalog::NumericFeature;
use crate::input::{Category, RawAssessmentInput, Selection};
use std::collections::BTreeMap;
use tracing::warn;

/// Feature name to value, holding only the columns the input produced.
///
/// A one-hot column that is absent means "not this category"; the aligner
/// fills it with 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseFeatureRecord {
    values: BTreeMap<String, f64>,
}

impl SparseFeatureRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Encode one assessment into its sparse feature record.
pub fn encode(raw: &RawAssessmentInput) -> SparseFeatureRecord {
    let mut record = SparseFeatureRecord::new();

    record.insert(NumericFeature::Age.column(), f64::from(raw.age));
    record.insert(NumericFeature::RestingBp.column(), f64::from(raw.resting_bp));
    record.insert(NumericFeature::Cholesterol.column(), f64::from(raw.cholesterol));
    record.insert(NumericFeature::FastingBs.column(), f64::from(raw.fasting_bs));
    record.insert(NumericFeature::MaxHr.column(), f64::from(raw.max_hr));
    record.insert(NumericFeature::Oldpeak.column(), raw.oldpeak);

    encode_selection(&mut record, &raw.sex);
    encode_selection(&mut record, &raw.chest_pain_type);
    encode_selection(&mut record, &raw.resting_ecg);
    encode_selection(&mut record, &raw.exercise_angina);
    encode_selection(&mut record, &raw.st_slope);

    record
}

fn encode_selection<C: Category>(record: &mut SparseFeatureRecord, selection: &Selection<C>) {
    match selection {
        Selection::Known(category) => record.insert(category.column(), 1.0),
        Selection::Unrecognized(literal) => {
            // The synthesized column will not be in any schema built from the
            // catalog, so alignment drops it and the field contributes zeros.
            warn!(field = %C::FIELD, literal = %literal, "unrecognized category literal");
            record.insert(C::FIELD.column_for(literal), 1.0);
        }
    }
}
