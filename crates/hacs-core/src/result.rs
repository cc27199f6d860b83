//! Classification results and the reset tokens that follow them.
//!
//! The classifier collaborator answers each upload with a label and a
//! confidence. The engine only needs the hazard flag; every accepted result
//! also gets a fresh [`SceneResetToken`] so the scene restarts from scratch
//! even when two consecutive results are identical.

use crate::error::ResultError;
use serde::{Deserialize, Serialize};

pub const LABEL_HAZARDOUS: &str = "Hazardous";
pub const LABEL_NON_HAZARDOUS: &str = "Non-Hazardous";

/// Opaque run identifier. A different token means "discard everything".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneResetToken(u64);

impl SceneResetToken {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Hazardous,
    Safe,
}

impl Outcome {
    pub fn from_flag(hazardous: bool) -> Self {
        if hazardous {
            Outcome::Hazardous
        } else {
            Outcome::Safe
        }
    }

    pub fn is_hazardous(self) -> bool {
        self == Outcome::Hazardous
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassificationResult {
    hazardous: bool,
    probability: f32,
}

impl ClassificationResult {
    pub fn new(hazardous: bool, probability: f32) -> Result<Self, ResultError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(ResultError::ProbabilityOutOfRange(probability));
        }
        Ok(Self {
            hazardous,
            probability,
        })
    }

    pub fn hazardous(&self) -> bool {
        self.hazardous
    }

    pub fn probability(&self) -> f32 {
        self.probability
    }

    pub fn outcome(&self) -> Outcome {
        Outcome::from_flag(self.hazardous)
    }
}

/// JSON body returned by the classifier's `/predict` endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction: String,
    pub confidence: f32,
}

impl TryFrom<PredictionResponse> for ClassificationResult {
    type Error = ResultError;

    fn try_from(resp: PredictionResponse) -> Result<Self, Self::Error> {
        let hazardous = match resp.prediction.trim() {
            LABEL_HAZARDOUS => true,
            LABEL_NON_HAZARDOUS => false,
            other => return Err(ResultError::UnknownLabel(other.to_string())),
        };
        ClassificationResult::new(hazardous, resp.confidence)
    }
}

/// Hands out a new token for every accepted result.
#[derive(Clone, Debug, Default)]
pub struct ResultFeed {
    last: SceneResetToken,
    latest: Option<ClassificationResult>,
}

impl ResultFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_token(&self) -> SceneResetToken {
        self.last
    }

    pub fn latest(&self) -> Option<&ClassificationResult> {
        self.latest.as_ref()
    }

    pub fn accept(&mut self, result: ClassificationResult) -> SceneResetToken {
        self.last = SceneResetToken(self.last.0.wrapping_add(1));
        self.latest = Some(result);
        log::info!(
            "[result] token={} hazardous={} p={:.3}",
            self.last.0,
            result.hazardous,
            result.probability
        );
        self.last
    }
}
