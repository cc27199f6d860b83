use thiserror::Error;

/// Rejected choreography configuration. Raised at construction, never mid-animation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be a positive, finite number of seconds (got {value})")]
    NonPositiveDuration { name: &'static str, value: f64 },
    #[error("{name} must be a positive, finite number of seconds (got {value})")]
    NonPositiveDelay { name: &'static str, value: f64 },
    #[error("near-end lead {lead}s must lie strictly inside the impact duration {duration}s")]
    NearEndLeadOutOfRange { lead: f64, duration: f64 },
    #[error("midpoint progress {0} must lie strictly between 0 and 1")]
    MidpointOutOfRange(f32),
    #[error("midpoint progress {midpoint} must come before near-end progress {near_end}")]
    ThresholdsOutOfOrder { midpoint: f32, near_end: f32 },
    #[error("{name} range [{min}, {max}] is empty or not finite")]
    InvalidRange { name: &'static str, min: f32, max: f32 },
    #[error("impact scale multiplier must be positive (got {0})")]
    NonPositiveScale(f32),
}

/// Rejected classification result coming from the classifier collaborator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResultError {
    #[error("probability {0} is outside [0, 1]")]
    ProbabilityOutOfRange(f32),
    #[error("unknown prediction label {0:?}")]
    UnknownLabel(String),
}
