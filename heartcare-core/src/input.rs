//! Raw assessment input as captured from the form.
//!
//! Numeric fields are carried verbatim; range limits belong to the form
//! widgets and are never re-checked here. Categorical fields are typed, but
//! a literal outside the known set is kept as [`Selection::Unrecognized`]
//! so it can flow through the pipeline the same way the form would send it.

use crate::features::catalog::CategoricalField;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A closed set of category literals belonging to one categorical field.
pub trait Category: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// The field this category belongs to.
    const FIELD: CategoricalField;
    /// Every category of the field, in form order.
    const ALL: &'static [Self];

    /// The literal the form submits for this category.
    fn literal(self) -> &'static str;

    /// The one-hot column this category sets to 1.
    fn column(self) -> &'static str;

    fn from_literal(literal: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.literal() == literal)
    }
}

macro_rules! category {
    (
        $(#[$meta:meta])*
        $name:ident => $field:ident {
            $($variant:ident = $literal:literal => $column:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl Category for $name {
            const FIELD: CategoricalField = CategoricalField::$field;
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn literal(self) -> &'static str {
                match self {
                    $(Self::$variant => $literal),+
                }
            }

            fn column(self) -> &'static str {
                match self {
                    $(Self::$variant => $column),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.literal())
            }
        }
    };
}

category! {
    /// Patient sex.
    Sex => Sex {
        Male = "M" => "Sex_M",
        Female = "F" => "Sex_F",
    }
}

category! {
    /// Chest pain type: atypical angina, non-anginal pain, typical angina,
    /// asymptomatic.
    ChestPainType => ChestPainType {
        Ata = "ATA" => "ChestPainType_ATA",
        Nap = "NAP" => "ChestPainType_NAP",
        Ta = "TA" => "ChestPainType_TA",
        Asy = "ASY" => "ChestPainType_ASY",
    }
}

category! {
    /// Resting electrocardiogram result.
    RestingEcg => RestingEcg {
        Normal = "Normal" => "RestingECG_Normal",
        St = "ST" => "RestingECG_ST",
        Lvh = "LVH" => "RestingECG_LVH",
    }
}

category! {
    /// Exercise-induced angina.
    ExerciseAngina => ExerciseAngina {
        Yes = "Y" => "ExerciseAngina_Y",
        No = "N" => "ExerciseAngina_N",
    }
}

category! {
    /// Slope of the peak exercise ST segment.
    StSlope => StSlope {
        Up = "Up" => "ST_Slope_Up",
        Flat = "Flat" => "ST_Slope_Flat",
        Down = "Down" => "ST_Slope_Down",
    }
}

/// The value submitted for a categorical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<C> {
    Known(C),
    /// A literal that matches no category of the field.
    Unrecognized(String),
}

impl<C: Category> Selection<C> {
    /// Parse a form literal. Matching is case-sensitive.
    pub fn parse(literal: &str) -> Self {
        C::from_literal(literal).map_or_else(|| Self::Unrecognized(literal.to_string()), Self::Known)
    }

    pub fn literal(&self) -> &str {
        match self {
            Self::Known(category) => category.literal(),
            Self::Unrecognized(literal) => literal,
        }
    }

    pub fn known(&self) -> Option<C> {
        match self {
            Self::Known(category) => Some(*category),
            Self::Unrecognized(_) => None,
        }
    }
}

impl<C: Category> From<C> for Selection<C> {
    fn from(category: C) -> Self {
        Self::Known(category)
    }
}

impl<C: Category> fmt::Display for Selection<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.literal())
    }
}

impl<C: Category> Serialize for Selection<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.literal())
    }
}

impl<'de, C: Category> Deserialize<'de> for Selection<C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let literal = String::deserialize(deserializer)?;
        Ok(Self::parse(&literal))
    }
}

/// One patient's vitals for a single assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAssessmentInput {
    /// Age in years.
    pub age: i32,
    /// Resting blood pressure (mm Hg).
    #[serde(rename = "restingBP")]
    pub resting_bp: i32,
    /// Serum cholesterol (mg/dL).
    pub cholesterol: i32,
    /// Fasting blood sugar above 120 mg/dL: 1, otherwise 0.
    #[serde(rename = "fastingBS")]
    pub fasting_bs: u8,
    /// Maximum heart rate achieved.
    #[serde(rename = "maxHR")]
    pub max_hr: i32,
    /// ST depression induced by exercise relative to rest.
    pub oldpeak: f64,
    pub sex: Selection<Sex>,
    pub chest_pain_type: Selection<ChestPainType>,
    #[serde(rename = "restingECG")]
    pub resting_ecg: Selection<RestingEcg>,
    pub exercise_angina: Selection<ExerciseAngina>,
    pub st_slope: Selection<StSlope>,
}

impl Default for RawAssessmentInput {
    /// The form's initial widget state.
    fn default() -> Self {
        Self {
            age: 40,
            resting_bp: 120,
            cholesterol: 200,
            fasting_bs: 0,
            max_hr: 150,
            oldpeak: 1.0,
            sex: Sex::Male.into(),
            chest_pain_type: ChestPainType::Ata.into(),
            resting_ecg: RestingEcg::Normal.into(),
            exercise_angina: ExerciseAngina::Yes.into(),
            st_slope: StSlope::Up.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_parse_known() {
        assert_eq!(
            Selection::<ChestPainType>::parse("ASY"),
            Selection::Known(ChestPainType::Asy)
        );
        assert_eq!(Selection::<Sex>::parse("F").known(), Some(Sex::Female));
    }

    #[test]
    fn test_selection_parse_is_case_sensitive() {
        let selection = Selection::<StSlope>::parse("up");
        assert_eq!(selection, Selection::Unrecognized("up".into()));
        assert_eq!(selection.literal(), "up");
        assert!(selection.known().is_none());
    }

    #[test]
    fn test_category_columns_carry_field_prefix() {
        for sex in Sex::ALL {
            assert_eq!(sex.column(), Sex::FIELD.column_for(sex.literal()));
        }
        for cp in ChestPainType::ALL {
            assert_eq!(cp.column(), ChestPainType::FIELD.column_for(cp.literal()));
        }
        for ecg in RestingEcg::ALL {
            assert_eq!(ecg.column(), RestingEcg::FIELD.column_for(ecg.literal()));
        }
        for angina in ExerciseAngina::ALL {
            assert_eq!(
                angina.column(),
                ExerciseAngina::FIELD.column_for(angina.literal())
            );
        }
        for slope in StSlope::ALL {
            assert_eq!(slope.column(), StSlope::FIELD.column_for(slope.literal()));
        }
    }

    #[test]
    fn test_input_deserializes_form_field_names() {
        let input: RawAssessmentInput = serde_json::from_value(serde_json::json!({
            "age": 54,
            "restingBP": 140,
            "cholesterol": 239,
            "fastingBS": 1,
            "maxHR": 160,
            "oldpeak": 1.2,
            "sex": "F",
            "chestPainType": "NAP",
            "restingECG": "LVH",
            "exerciseAngina": "N",
            "stSlope": "Flat"
        }))
        .unwrap();
        assert_eq!(input.resting_bp, 140);
        assert_eq!(input.fasting_bs, 1);
        assert_eq!(input.sex.known(), Some(Sex::Female));
        assert_eq!(input.resting_ecg.known(), Some(RestingEcg::Lvh));
        assert_eq!(input.st_slope.known(), Some(StSlope::Flat));
    }

    #[test]
    fn test_input_keeps_unrecognized_literal() {
        let mut value = serde_json::to_value(RawAssessmentInput::default()).unwrap();
        value["chestPainType"] = serde_json::json!("XYZ");
        let input: RawAssessmentInput = serde_json::from_value(value).unwrap();
        assert_eq!(
            input.chest_pain_type,
            Selection::Unrecognized("XYZ".to_string())
        );
    }

    #[test]
    fn test_default_matches_form_initial_state() {
        let input = RawAssessmentInput::default();
        assert_eq!(input.age, 40);
        assert_eq!(input.max_hr, 150);
        assert_eq!(input.exercise_angina.known(), Some(ExerciseAngina::Yes));
        assert_eq!(input.st_slope.to_string(), "Up");
    }
}
