//! The feature catalog: every column name the encoder can produce.
//!
//! Column names are listed explicitly (numeric columns here, one-hot columns
//! on each [`Category`]) so that naming drift against a trained model's
//! column list is caught when artifacts load rather than per request.

use crate::input::{Category, ChestPainType, ExerciseAngina, RestingEcg, Sex, StSlope};
use crate::schema::ExpectedColumnSchema;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Numeric inputs, copied into the record under a fixed column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericFeature {
    Age,
    RestingBp,
    Cholesterol,
    FastingBs,
    MaxHr,
    Oldpeak,
}

impl NumericFeature {
    pub const ALL: [Self; 6] = [
        Self::Age,
        Self::RestingBp,
        Self::Cholesterol,
        Self::FastingBs,
        Self::MaxHr,
        Self::Oldpeak,
    ];

    pub fn column(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::RestingBp => "RestingBP",
            Self::Cholesterol => "Cholesterol",
            Self::FastingBs => "FastingBS",
            Self::MaxHr => "MaxHR",
            Self::Oldpeak => "Oldpeak",
        }
    }
}

/// Categorical inputs, one-hot encoded as `<prefix>_<literal>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalField {
    Sex,
    ChestPainType,
    RestingEcg,
    ExerciseAngina,
    StSlope,
}

impl CategoricalField {
    pub const ALL: [Self; 5] = [
        Self::Sex,
        Self::ChestPainType,
        Self::RestingEcg,
        Self::ExerciseAngina,
        Self::StSlope,
    ];

    /// Column-name prefix used by the trained model.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Sex => "Sex",
            Self::ChestPainType => "ChestPainType",
            Self::RestingEcg => "RestingECG",
            Self::ExerciseAngina => "ExerciseAngina",
            Self::StSlope => "ST_Slope",
        }
    }

    /// Column name for an arbitrary literal of this field.
    pub fn column_for(self, literal: &str) -> String {
        format!("{}_{}", self.prefix(), literal)
    }

    /// Known one-hot columns of this field.
    pub fn columns(self) -> Vec<&'static str> {
        match self {
            Self::Sex => columns_of::<Sex>(),
            Self::ChestPainType => columns_of::<ChestPainType>(),
            Self::RestingEcg => columns_of::<RestingEcg>(),
            Self::ExerciseAngina => columns_of::<ExerciseAngina>(),
            Self::StSlope => columns_of::<StSlope>(),
        }
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

fn columns_of<C: Category>() -> Vec<&'static str> {
    C::ALL.iter().map(|c| c.column()).collect()
}

/// Every column the encoder can emit for recognized input, numeric first.
pub fn catalog_columns() -> Vec<&'static str> {
    NumericFeature::ALL
        .iter()
        .map(|f| f.column())
        .chain(CategoricalField::ALL.iter().flat_map(|f| f.columns()))
        .collect()
}

/// Differences between the feature catalog and a loaded schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogCoverage {
    /// Catalog columns the schema does not contain. Input selecting these
    /// is dropped during alignment.
    pub missing_from_schema: Vec<String>,
    /// Schema columns the encoder never produces. These are always 0.
    pub unknown_to_catalog: Vec<String>,
}

impl CatalogCoverage {
    pub fn is_complete(&self) -> bool {
        self.missing_from_schema.is_empty() && self.unknown_to_catalog.is_empty()
    }
}

/// Compare the catalog with a schema.
pub fn check_coverage(schema: &ExpectedColumnSchema) -> CatalogCoverage {
    let catalog = catalog_columns();
    let known: HashSet<&str> = catalog.iter().copied().collect();

    let missing_from_schema = catalog
        .iter()
        .filter(|column| !schema.contains(column))
        .map(|column| column.to_string())
        .collect();
    let unknown_to_catalog = schema
        .iter()
        .filter(|column| !known.contains(column))
        .map(str::to_string)
        .collect();

    CatalogCoverage {
        missing_from_schema,
        unknown_to_catalog,
    }
}
