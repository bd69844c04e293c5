use alzdx_schema::Identity;
use serde::{Deserialize, Serialize};

/// Probabilities strictly above this are labelled positive.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// `1` iff `probability` strictly exceeds the decision threshold.
pub fn label_for(probability: f64) -> u8 {
    u8::from(probability > DECISION_THRESHOLD)
}

/// Confidence score with exactly two decimals.
pub fn format_confidence(probability: f64) -> String {
    format!("{probability:.2}")
}

/// Outcome of one prediction request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub probability: f64,
    pub label: u8,
    pub identity: Identity,
}

impl PredictionResult {
    pub fn new(probability: f64, identity: Identity) -> Self {
        Self {
            probability,
            label: label_for(probability),
            identity,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.label == 1
    }

    pub fn confidence(&self) -> String {
        format_confidence(self.probability)
    }
}
