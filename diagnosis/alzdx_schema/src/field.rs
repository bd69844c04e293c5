//! The fixed set of patient fields in classifier column order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of fields in a complete patient record.
pub const FIELD_COUNT: usize = 25;

/// Semantic class of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Real-valued measurement with an inclusive valid range.
    Continuous { min: f64, max: f64 },
    /// Yes/no indicator encoded as `0` or `1`.
    Flag,
}

impl FieldKind {
    pub fn is_flag(&self) -> bool {
        matches!(self, FieldKind::Flag)
    }
}

/// A patient attribute consumed by the classifier.
///
/// Variant order is the column order the classifier was trained with, so
/// `Field::ALL[i].index() == i` holds for every field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    Age,
    Gender,
    #[serde(rename = "BMI")]
    Bmi,
    Smoking,
    AlcoholConsumption,
    FamilyHistoryAlzheimers,
    CardiovascularDisease,
    Diabetes,
    Depression,
    HeadInjury,
    Hypertension,
    CholesterolTotal,
    #[serde(rename = "CholesterolLDL")]
    CholesterolLdl,
    #[serde(rename = "CholesterolHDL")]
    CholesterolHdl,
    CholesterolTriglycerides,
    #[serde(rename = "MMSE")]
    Mmse,
    FunctionalAssessment,
    MemoryComplaints,
    BehavioralProblems,
    #[serde(rename = "ADL")]
    Adl,
    Confusion,
    Disorientation,
    PersonalityChanges,
    DifficultyCompletingTasks,
    Forgetfulness,
}

impl Field {
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::Age,
        Field::Gender,
        Field::Bmi,
        Field::Smoking,
        Field::AlcoholConsumption,
        Field::FamilyHistoryAlzheimers,
        Field::CardiovascularDisease,
        Field::Diabetes,
        Field::Depression,
        Field::HeadInjury,
        Field::Hypertension,
        Field::CholesterolTotal,
        Field::CholesterolLdl,
        Field::CholesterolHdl,
        Field::CholesterolTriglycerides,
        Field::Mmse,
        Field::FunctionalAssessment,
        Field::MemoryComplaints,
        Field::BehavioralProblems,
        Field::Adl,
        Field::Confusion,
        Field::Disorientation,
        Field::PersonalityChanges,
        Field::DifficultyCompletingTasks,
        Field::Forgetfulness,
    ];

    /// Continuous columns normalised before inference unless the scaler
    /// artifact declares otherwise.
    pub const DEFAULT_SCALED: [Field; 6] = [
        Field::Age,
        Field::Bmi,
        Field::CholesterolTotal,
        Field::CholesterolLdl,
        Field::CholesterolHdl,
        Field::CholesterolTriglycerides,
    ];

    /// Position of this field in a record and in the classifier input.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column key used in patient JSON, training CSV headers and artifacts.
    pub fn key(self) -> &'static str {
        match self {
            Field::Age => "Age",
            Field::Gender => "Gender",
            Field::Bmi => "BMI",
            Field::Smoking => "Smoking",
            Field::AlcoholConsumption => "AlcoholConsumption",
            Field::FamilyHistoryAlzheimers => "FamilyHistoryAlzheimers",
            Field::CardiovascularDisease => "CardiovascularDisease",
            Field::Diabetes => "Diabetes",
            Field::Depression => "Depression",
            Field::HeadInjury => "HeadInjury",
            Field::Hypertension => "Hypertension",
            Field::CholesterolTotal => "CholesterolTotal",
            Field::CholesterolLdl => "CholesterolLDL",
            Field::CholesterolHdl => "CholesterolHDL",
            Field::CholesterolTriglycerides => "CholesterolTriglycerides",
            Field::Mmse => "MMSE",
            Field::FunctionalAssessment => "FunctionalAssessment",
            Field::MemoryComplaints => "MemoryComplaints",
            Field::BehavioralProblems => "BehavioralProblems",
            Field::Adl => "ADL",
            Field::Confusion => "Confusion",
            Field::Disorientation => "Disorientation",
            Field::PersonalityChanges => "PersonalityChanges",
            Field::DifficultyCompletingTasks => "DifficultyCompletingTasks",
            Field::Forgetfulness => "Forgetfulness",
        }
    }

    /// Human-readable label printed in the report.
    pub fn label(self) -> &'static str {
        match self {
            Field::Age => "Age",
            Field::Gender => "Gender",
            Field::Bmi => "BMI",
            Field::Smoking => "Smoking",
            Field::AlcoholConsumption => "Alcohol Consumption",
            Field::FamilyHistoryAlzheimers => "Family History of Alzheimer's",
            Field::CardiovascularDisease => "Cardiovascular Disease",
            Field::Diabetes => "Diabetes",
            Field::Depression => "Depression",
            Field::HeadInjury => "Head Injury",
            Field::Hypertension => "Hypertension",
            Field::CholesterolTotal => "Total Cholesterol",
            Field::CholesterolLdl => "LDL Cholesterol",
            Field::CholesterolHdl => "HDL Cholesterol",
            Field::CholesterolTriglycerides => "Triglycerides",
            Field::Mmse => "MMSE Score",
            Field::FunctionalAssessment => "Functional Assessment Score",
            Field::MemoryComplaints => "Memory Complaints",
            Field::BehavioralProblems => "Behavioral Problems",
            Field::Adl => "ADL Score",
            Field::Confusion => "Confusion",
            Field::Disorientation => "Disorientation",
            Field::PersonalityChanges => "Personality Changes",
            Field::DifficultyCompletingTasks => "Difficulty Completing Tasks",
            Field::Forgetfulness => "Forgetfulness",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Age => FieldKind::Continuous { min: 20.0, max: 90.0 },
            Field::Bmi => FieldKind::Continuous { min: 15.0, max: 40.0 },
            Field::AlcoholConsumption => FieldKind::Continuous { min: 0.0, max: 20.0 },
            Field::CholesterolTotal => FieldKind::Continuous {
                min: 150.0,
                max: 300.0,
            },
            Field::CholesterolLdl => FieldKind::Continuous {
                min: 50.0,
                max: 200.0,
            },
            Field::CholesterolHdl => FieldKind::Continuous {
                min: 20.0,
                max: 100.0,
            },
            Field::CholesterolTriglycerides => FieldKind::Continuous {
                min: 50.0,
                max: 400.0,
            },
            Field::Mmse => FieldKind::Continuous { min: 0.0, max: 30.0 },
            Field::FunctionalAssessment | Field::Adl => {
                FieldKind::Continuous { min: 0.0, max: 10.0 }
            }
            _ => FieldKind::Flag,
        }
    }

    pub fn is_flag(self) -> bool {
        self.kind().is_flag()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.key() == key)
            .ok_or_else(|| UnknownField(key.to_string()))
    }
}
