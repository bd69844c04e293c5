//! Grouping of fields into the report's sections.

use crate::field::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    GeneralDetails,
    LifestyleFactors,
    MedicalHistory,
    ClinicalMeasurements,
    CognitiveAssessments,
    Symptoms,
}

impl Section {
    /// Sections in report order.
    pub const ALL: [Section; 6] = [
        Section::GeneralDetails,
        Section::LifestyleFactors,
        Section::MedicalHistory,
        Section::ClinicalMeasurements,
        Section::CognitiveAssessments,
        Section::Symptoms,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::GeneralDetails => "General Details",
            Section::LifestyleFactors => "Lifestyle Factors",
            Section::MedicalHistory => "Medical History",
            Section::ClinicalMeasurements => "Clinical Measurements",
            Section::CognitiveAssessments => "Cognitive and Functional Assessments",
            Section::Symptoms => "Symptoms",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Section::GeneralDetails => {
                "These details help in understanding the basic demographic information of the \
                 patient, which is essential for tailoring the prediction model."
            }
            Section::LifestyleFactors => {
                "Lifestyle factors such as BMI, smoking, and alcohol consumption can \
                 significantly influence the risk of Alzheimer's disease. This section helps \
                 capture those aspects."
            }
            Section::MedicalHistory => {
                "A patient's medical history, including family history and chronic conditions, \
                 provides important context for assessing Alzheimer's risk. This section \
                 collects relevant medical information."
            }
            Section::ClinicalMeasurements => {
                "Clinical measurements such as cholesterol levels and triglycerides are \
                 important indicators of overall health and can influence the risk of \
                 Alzheimer's disease. This section gathers those metrics."
            }
            Section::CognitiveAssessments => {
                "Assessments of cognitive and functional abilities provide insights into the \
                 patient's mental state and daily functioning, which are crucial for \
                 diagnosing Alzheimer's disease."
            }
            Section::Symptoms => {
                "Symptoms such as confusion, disorientation, and personality changes are key \
                 indicators of cognitive decline. This section collects information on these \
                 symptoms to aid in the diagnosis."
            }
        }
    }

    pub fn fields(self) -> &'static [Field] {
        match self {
            Section::GeneralDetails => &[Field::Age, Field::Gender],
            Section::LifestyleFactors => &[Field::Bmi, Field::Smoking, Field::AlcoholConsumption],
            Section::MedicalHistory => &[
                Field::FamilyHistoryAlzheimers,
                Field::CardiovascularDisease,
                Field::Diabetes,
                Field::Depression,
                Field::HeadInjury,
                Field::Hypertension,
            ],
            Section::ClinicalMeasurements => &[
                Field::CholesterolTotal,
                Field::CholesterolLdl,
                Field::CholesterolHdl,
                Field::CholesterolTriglycerides,
            ],
            Section::CognitiveAssessments => &[
                Field::Mmse,
                Field::FunctionalAssessment,
                Field::MemoryComplaints,
                Field::BehavioralProblems,
                Field::Adl,
            ],
            Section::Symptoms => &[
                Field::Confusion,
                Field::Disorientation,
                Field::PersonalityChanges,
                Field::DifficultyCompletingTasks,
                Field::Forgetfulness,
            ],
        }
    }
}
