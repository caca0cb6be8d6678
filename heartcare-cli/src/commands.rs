//! Subcommand handlers.

use crate::render;
use anyhow::Context;
use heartcare_core::{
    HeartcareConfig, ModelArtifacts, RawAssessmentInput, RiskPipeline, Selection,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

const FIELD_FLAGS: [&str; 11] = [
    "age",
    "sex",
    "chest_pain",
    "exercise_angina",
    "resting_bp",
    "cholesterol",
    "max_hr",
    "fasting_bs",
    "resting_ecg",
    "oldpeak",
    "st_slope",
];

/// Patient fields, bounded the way the assessment form bounds them.
#[derive(clap::Args, Debug)]
pub struct AssessArgs {
    /// Age in years
    #[arg(long, default_value_t = 40, value_parser = clap::value_parser!(i32).range(18..=100))]
    pub age: i32,

    /// Sex
    #[arg(long, default_value = "M", value_parser = ["M", "F"])]
    pub sex: String,

    /// Chest pain type
    #[arg(long, default_value = "ATA", value_parser = ["ATA", "NAP", "TA", "ASY"])]
    pub chest_pain: String,

    /// Exercise-induced angina
    #[arg(long, default_value = "Y", value_parser = ["Y", "N"])]
    pub exercise_angina: String,

    /// Resting blood pressure (mm Hg)
    #[arg(long, default_value_t = 120, value_parser = clap::value_parser!(i32).range(80..=200))]
    pub resting_bp: i32,

    /// Cholesterol (mg/dL)
    #[arg(long, default_value_t = 200, value_parser = clap::value_parser!(i32).range(100..=600))]
    pub cholesterol: i32,

    /// Maximum heart rate
    #[arg(long, default_value_t = 150, value_parser = clap::value_parser!(i32).range(60..=220))]
    pub max_hr: i32,

    /// Fasting blood sugar > 120 mg/dL (1) or not (0)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub fasting_bs: u8,

    /// Resting ECG
    #[arg(long, default_value = "Normal", value_parser = ["Normal", "ST", "LVH"])]
    pub resting_ecg: String,

    /// ST depression (oldpeak)
    #[arg(long, default_value_t = 1.0, value_parser = parse_oldpeak)]
    pub oldpeak: f64,

    /// ST slope
    #[arg(long, default_value = "Up", value_parser = ["Up", "Flat", "Down"])]
    pub st_slope: String,

    /// Read the fields from a JSON file instead of flags
    #[arg(long, conflicts_with_all = FIELD_FLAGS)]
    pub input: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl AssessArgs {
    fn to_input(&self) -> anyhow::Result<RawAssessmentInput> {
        if let Some(path) = &self.input {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file {}", path.display()))?;
            return serde_json::from_str(&content)
                .with_context(|| format!("Invalid assessment input in {}", path.display()));
        }

        Ok(RawAssessmentInput {
            age: self.age,
            resting_bp: self.resting_bp,
            cholesterol: self.cholesterol,
            fasting_bs: self.fasting_bs,
            max_hr: self.max_hr,
            oldpeak: self.oldpeak,
            sex: Selection::parse(&self.sex),
            chest_pain_type: Selection::parse(&self.chest_pain),
            resting_ecg: Selection::parse(&self.resting_ecg),
            exercise_angina: Selection::parse(&self.exercise_angina),
            st_slope: Selection::parse(&self.st_slope),
        })
    }
}

fn parse_oldpeak(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=6.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=6.0"))
    }
}

fn load_artifacts(config: &HeartcareConfig, workspace: &Path) -> anyhow::Result<ModelArtifacts> {
    let artifacts = ModelArtifacts::load_with_config(&config.artifacts, workspace)
        .context("Model artifacts could not be loaded; refusing to assess")?;
    info!(
        dir = %config.artifacts.dir.display(),
        columns = artifacts.schema().len(),
        classifier = artifacts.classifier().kind(),
        "artifacts ready"
    );
    Ok(artifacts)
}

pub fn assess(args: &AssessArgs, config: &HeartcareConfig, workspace: &Path) -> anyhow::Result<()> {
    let input = args.to_input()?;
    let pipeline = RiskPipeline::new(Arc::new(load_artifacts(config, workspace)?));
    let assessment = pipeline.assess(&input);
    info!(id = %assessment.id, label = assessment.label.as_str(), "assessment finished");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&render::json(&assessment))?);
    } else {
        println!("{}", render::text(&assessment));
    }
    Ok(())
}

pub fn check(config: &HeartcareConfig, workspace: &Path) -> anyhow::Result<()> {
    let artifacts = load_artifacts(config, workspace)?;
    println!("{}", render::check_report(&artifacts));
    Ok(())
}

pub fn show_config(config: &HeartcareConfig) -> anyhow::Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use heartcare_core::{ChestPainType, RiskLabel, Sex};

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: AssessArgs,
    }

    fn parse(argv: &[&str]) -> AssessArgs {
        let mut full = vec!["assess"];
        full.extend_from_slice(argv);
        Harness::try_parse_from(full).unwrap().args
    }

    fn sample_workspace() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).parent().unwrap().to_path_buf()
    }

    #[test]
    fn test_flags_build_input() {
        let input = parse(&["--sex", "F", "--chest-pain", "ASY", "--oldpeak", "2.5"])
            .to_input()
            .unwrap();
        assert_eq!(input.sex.known(), Some(Sex::Female));
        assert_eq!(input.chest_pain_type.known(), Some(ChestPainType::Asy));
        assert_eq!(input.oldpeak, 2.5);
        assert_eq!(input.age, 40);
    }

    #[test]
    fn test_input_file_allows_unrecognized_literal() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("patient.json");
        let mut value = serde_json::to_value(RawAssessmentInput::default()).unwrap();
        value["stSlope"] = serde_json::json!("Sideways");
        value["age"] = serde_json::json!(130);
        std::fs::write(&file, value.to_string()).unwrap();

        let input = parse(&["--input", file.to_str().unwrap()]).to_input().unwrap();
        assert_eq!(input.age, 130);
        assert_eq!(input.st_slope, Selection::Unrecognized("Sideways".into()));
    }

    #[test]
    fn test_input_file_missing_is_error() {
        let err = parse(&["--input", "/nonexistent/patient.json"])
            .to_input()
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }

    #[test]
    fn test_parse_oldpeak_bounds() {
        assert_eq!(parse_oldpeak("0"), Ok(0.0));
        assert_eq!(parse_oldpeak("6.0"), Ok(6.0));
        assert!(parse_oldpeak("-0.1").is_err());
        assert!(parse_oldpeak("abc").is_err());
    }

    #[test]
    fn test_assess_with_sample_artifacts() {
        let config = HeartcareConfig::default();
        let artifacts = load_artifacts(&config, &sample_workspace()).unwrap();
        let pipeline = RiskPipeline::new(Arc::new(artifacts));
        let input = parse(&["--exercise-angina", "N"]).to_input().unwrap();
        assert_eq!(pipeline.assess(&input).label, RiskLabel::Low);
    }

    #[test]
    fn test_missing_artifacts_refuse_to_assess() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_artifacts(&HeartcareConfig::default(), dir.path()).unwrap_err();
        assert!(err.to_string().contains("refusing to assess"));
    }
}
