//! Risk verdict and its fixed human-readable rendering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary outcome of an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLabel {
    High,
    Low,
}

impl RiskLabel {
    /// Map a classifier class to a label: 1 is high risk, anything else low.
    pub fn from_class(class: u8) -> Self {
        if class == 1 { Self::High } else { Self::Low }
    }

    pub fn class(self) -> u8 {
        match self {
            Self::High => 1,
            Self::Low => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            Self::High => "High Risk Detected",
            Self::Low => "Low Risk Detected",
        }
    }

    pub fn advice(self) -> &'static str {
        match self {
            Self::High => {
                "The model indicates a high probability of heart disease. \
                 Immediate clinical consultation is recommended."
            }
            Self::Low => {
                "The model indicates a low probability of heart disease. \
                 Maintain a healthy lifestyle and routine checkups."
            }
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.headline())
    }
}
