//! Approach controller: flies the asteroid from its start point into the impact
//! site.
//!
//! Progress is `min(t / D, 1)` where `t` is time since [`ApproachController::activate`].
//! Position and scale follow [`ease_in`] of that progress, not the raw ratio.
//! Reaching 1 collapses the body to scale zero and reports
//! [`ApproachSignal::Completed`] exactly once.

use crate::clock::FrameTick;
use crate::config::ApproachConfig;
use crate::constants::{
    vec3_of, APPROACH_SPIN_BASE, APPROACH_SPIN_GAIN, EASE_CUBIC_WEIGHT, EASE_LINEAR_WEIGHT,
    IDLE_SPIN,
};
use crate::error::ConfigError;
use crate::latch::Latch;
use crate::state::BodyPose;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApproachState {
    Idle,
    Approaching,
    Impacted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApproachSignal {
    Completed,
}

/// Mostly linear remap with a small cubic acceleration term.
///
/// Downstream visuals are tuned against exactly this blend.
#[inline]
pub fn ease_in(r: f32) -> f32 {
    EASE_CUBIC_WEIGHT * r * r * r + EASE_LINEAR_WEIGHT * r
}

#[derive(Clone, Debug)]
pub struct ApproachController {
    config: ApproachConfig,
    state: ApproachState,
    started_at: f64,
    progress: f32,
    pose: BodyPose,
    completed: Latch,
}

impl ApproachController {
    pub fn new(config: ApproachConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let pose = BodyPose {
            position: config.start_position,
            scale: config.start_scale,
            rotation: Vec3::ZERO,
        };
        Ok(Self {
            config,
            state: ApproachState::Idle,
            started_at: 0.0,
            progress: 0.0,
            pose,
            completed: Latch::default(),
        })
    }

    pub fn config(&self) -> &ApproachConfig {
        &self.config
    }

    pub fn state(&self) -> ApproachState {
        self.state
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn pose(&self) -> BodyPose {
        self.pose
    }

    /// True once the scene has been mounted longer than the activation delay.
    pub fn delay_elapsed(&self, since_mount: f64) -> bool {
        since_mount > self.config.activation_delay_sec
    }

    /// Start the approach at `now`. No-op unless idle; returns whether it started.
    pub fn activate(&mut self, now: f64) -> bool {
        if self.state != ApproachState::Idle {
            return false;
        }
        self.state = ApproachState::Approaching;
        self.started_at = now;
        log::debug!("[approach] activated at {:.3}s", now);
        true
    }

    pub fn tick(&mut self, tick: FrameTick) -> Option<ApproachSignal> {
        match self.state {
            ApproachState::Idle => {
                self.pose.position = self.config.start_position;
                self.pose.scale = self.config.start_scale;
                self.pose.rotation += vec3_of(IDLE_SPIN) * tick.delta;
                None
            }
            ApproachState::Approaching => self.advance(tick),
            ApproachState::Impacted => None,
        }
    }

    fn advance(&mut self, tick: FrameTick) -> Option<ApproachSignal> {
        let t = (tick.elapsed - self.started_at).max(0.0);
        let duration = self.config.duration_sec;
        if t < duration {
            let r = ((t / duration) as f32).min(1.0);
            self.progress = self.progress.max(r);
            let eased = ease_in(self.progress);
            self.pose.position = self
                .config
                .start_position
                .lerp(self.config.target_position, eased);
            self.pose.scale =
                self.config.start_scale + (self.config.target_scale - self.config.start_scale) * eased;
            let spin = vec3_of(APPROACH_SPIN_BASE) + vec3_of(APPROACH_SPIN_GAIN) * eased;
            self.pose.rotation += spin * tick.delta;
            return None;
        }

        self.state = ApproachState::Impacted;
        self.progress = 1.0;
        self.pose.position = self.config.target_position;
        self.pose.scale = 0.0;
        if self.completed.fire() {
            log::debug!("[approach] completed at {:.3}s", tick.elapsed);
            Some(ApproachSignal::Completed)
        } else {
            None
        }
    }
}
