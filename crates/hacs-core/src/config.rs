//! Choreography configuration.
//!
//! Every timed component validates its own slice of [`ChoreographyConfig`] when
//! it is constructed, so a bad duration surfaces as a [`ConfigError`] before
//! the first frame rather than as a broken animation. Defaults reproduce the
//! tuning in [`crate::constants`].

use crate::constants::*;
use crate::error::ConfigError;
use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChoreographyConfig {
    pub approach: ApproachConfig,
    pub impact: ImpactConfig,
    pub particles: ParticleConfig,
    pub background: BackgroundConfig,
}

impl ChoreographyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.approach.validate()?;
        self.impact.validate()?;
        self.particles.validate()
    }
}

/// Path and timing of the crashing body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApproachConfig {
    pub duration_sec: f64,
    /// Seconds after scene mount before the approach may begin.
    pub activation_delay_sec: f64,
    pub start_position: Vec3,
    pub target_position: Vec3,
    pub start_scale: f32,
    pub target_scale: f32,
}

impl Default for ApproachConfig {
    fn default() -> Self {
        Self {
            duration_sec: APPROACH_DURATION_SEC,
            activation_delay_sec: APPROACH_ACTIVATION_DELAY_SEC,
            start_position: vec3_of(APPROACH_START_POSITION),
            target_position: vec3_of(APPROACH_TARGET_POSITION),
            start_scale: APPROACH_START_SCALE,
            target_scale: APPROACH_TARGET_SCALE,
        }
    }
}

impl ApproachConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive_duration("approach.duration_sec", self.duration_sec)?;
        if !(self.activation_delay_sec.is_finite() && self.activation_delay_sec > 0.0) {
            return Err(ConfigError::NonPositiveDelay {
                name: "approach.activation_delay_sec",
                value: self.activation_delay_sec,
            });
        }
        Ok(())
    }
}

/// Explosion timing and its notification thresholds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactConfig {
    pub duration_sec: f64,
    pub position: Vec3,
    pub scale_multiplier: f32,
    pub midpoint_progress: f32,
    /// How long before completion the near-end hook fires.
    pub near_end_lead_sec: f64,
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self {
            duration_sec: IMPACT_DURATION_SEC,
            position: vec3_of(IMPACT_POSITION),
            scale_multiplier: IMPACT_SCALE_MULTIPLIER,
            midpoint_progress: IMPACT_MIDPOINT_PROGRESS,
            near_end_lead_sec: IMPACT_NEAR_END_LEAD_SEC,
        }
    }
}

impl ImpactConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive_duration("impact.duration_sec", self.duration_sec)?;
        if !(self.near_end_lead_sec > 0.0 && self.near_end_lead_sec < self.duration_sec) {
            return Err(ConfigError::NearEndLeadOutOfRange {
                lead: self.near_end_lead_sec,
                duration: self.duration_sec,
            });
        }
        if !(self.midpoint_progress > 0.0 && self.midpoint_progress < 1.0) {
            return Err(ConfigError::MidpointOutOfRange(self.midpoint_progress));
        }
        let near_end = self.near_end_progress();
        if self.midpoint_progress >= near_end {
            return Err(ConfigError::ThresholdsOutOfOrder {
                midpoint: self.midpoint_progress,
                near_end,
            });
        }
        if !(self.scale_multiplier.is_finite() && self.scale_multiplier > 0.0) {
            return Err(ConfigError::NonPositiveScale(self.scale_multiplier));
        }
        Ok(())
    }

    /// Progress at which the near-end hook fires: `(duration - lead) / duration`.
    pub fn near_end_progress(&self) -> f32 {
        ((self.duration_sec - self.near_end_lead_sec) / self.duration_sec) as f32
    }
}

/// Debris field generation ranges and motion scales.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    pub speed_range: [f32; 2],
    pub size_range: [f32; 2],
    pub elevation_range: [f32; 2],
    pub distance_scale: f32,
    pub elevation_scale: f32,
    pub jitter_scale: f32,
    pub palette: [[f32; 3]; 2],
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            speed_range: PARTICLE_SPEED_RANGE,
            size_range: PARTICLE_SIZE_RANGE,
            elevation_range: PARTICLE_ELEVATION_RANGE,
            distance_scale: PARTICLE_DISTANCE_SCALE,
            elevation_scale: PARTICLE_ELEVATION_SCALE,
            jitter_scale: PARTICLE_JITTER_SCALE,
            palette: [DEBRIS_ORANGE, DEBRIS_YELLOW],
        }
    }
}

impl ParticleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        valid_range("particles.speed_range", self.speed_range)?;
        valid_range("particles.size_range", self.size_range)?;
        valid_range("particles.elevation_range", self.elevation_range)
    }
}

/// The planet sitting behind the impact site.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub position: Vec3,
    pub spin_x: f32,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            position: vec3_of(PLANET_POSITION),
            spin_x: PLANET_SPIN_X,
        }
    }
}

fn positive_duration(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveDuration { name, value })
    }
}

fn valid_range(name: &'static str, [min, max]: [f32; 2]) -> Result<(), ConfigError> {
    if min.is_finite() && max.is_finite() && min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { name, min, max })
    }
}
