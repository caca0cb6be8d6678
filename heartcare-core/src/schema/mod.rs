//! Expected-column schema and alignment of sparse records against it.

pub mod align;

pub use align::{AlignedFeatureVector, AlignmentReport, align, align_with_report};

use crate::error::HeartcareError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ordered feature names the trained model was fitted on.
///
/// Non-empty, each name exactly once. Serialized as a plain JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ExpectedColumnSchema {
    columns: Vec<String>,
    index: HashMap<String, usize>,
}

impl ExpectedColumnSchema {
    pub fn new(columns: Vec<String>) -> Result<Self, HeartcareError> {
        if columns.is_empty() {
            return Err(HeartcareError::schema("expected column list is empty"));
        }
        let mut index = HashMap::with_capacity(columns.len());
        for (position, name) in columns.iter().enumerate() {
            if index.insert(name.clone(), position).is_some() {
                return Err(HeartcareError::schema(format!(
                    "column `{name}` appears more than once"
                )));
            }
        }
        Ok(Self { columns, index })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false for a constructed schema.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }
}

impl TryFrom<Vec<String>> for ExpectedColumnSchema {
    type Error = HeartcareError;

    fn try_from(columns: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(columns)
    }
}

impl From<ExpectedColumnSchema> for Vec<String> {
    fn from(schema: ExpectedColumnSchema) -> Self {
        schema.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_preserves_order() {
        let schema =
            ExpectedColumnSchema::new(vec!["MaxHR".into(), "Age".into(), "Sex_M".into()]).unwrap();
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.position("Age"), Some(1));
        assert_eq!(schema.iter().collect::<Vec<_>>(), vec!["MaxHR", "Age", "Sex_M"]);
    }

    #[test]
    fn test_empty_schema_rejected() {
        let err = ExpectedColumnSchema::new(Vec::new()).unwrap_err();
        assert!(matches!(err, HeartcareError::Schema(_)));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let err = ExpectedColumnSchema::new(vec!["Age".into(), "Sex_M".into(), "Age".into()])
            .unwrap_err();
        assert!(err.to_string().contains("`Age` appears more than once"));
    }

    #[test]
    fn test_schema_json_is_plain_array() {
        let schema: ExpectedColumnSchema =
            serde_json::from_str(r#"["Age", "Oldpeak", "Sex_F"]"#).unwrap();
        assert!(schema.contains("Oldpeak"));
        assert_eq!(
            serde_json::to_string(&schema).unwrap(),
            r#"["Age","Oldpeak","Sex_F"]"#
        );
    }

    #[test]
    fn test_schema_json_rejects_duplicates() {
        let result: Result<ExpectedColumnSchema, _> = serde_json::from_str(r#"["Age", "Age"]"#);
        assert!(result.is_err());
    }
}
