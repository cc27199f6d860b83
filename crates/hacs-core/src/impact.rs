//! Impact controller: the explosion at the crash site.
//!
//! Owns the progress value the debris field reads. Each tick it evaluates its
//! three thresholds in ascending order (midpoint, near-end, complete), each
//! behind its own [`Latch`], so one tick that skips far ahead still reports
//! every crossed threshold, in order, once.

use crate::clock::FrameTick;
use crate::config::ImpactConfig;
use crate::constants::IMPACT_SPIN_Z;
use crate::error::ConfigError;
use crate::latch::Latch;
use crate::state::ExplosionPose;
use glam::Vec3;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImpactState {
    Inactive,
    Active,
    Complete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImpactSignal {
    Midpoint,
    NearEnd,
    Complete,
}

/// Signals newly fired by one tick, in threshold order.
pub type ImpactSignals = SmallVec<[ImpactSignal; 3]>;

#[derive(Clone, Debug)]
pub struct ImpactController {
    config: ImpactConfig,
    near_end_progress: f32,
    state: ImpactState,
    origin: Vec3,
    started_at: f64,
    progress: f32,
    spin_z: f32,
    midpoint: Latch,
    near_end: Latch,
    complete: Latch,
}

impl ImpactController {
    pub fn new(config: ImpactConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            near_end_progress: config.near_end_progress(),
            origin: config.position,
            config,
            state: ImpactState::Inactive,
            started_at: 0.0,
            progress: 0.0,
            spin_z: 0.0,
            midpoint: Latch::default(),
            near_end: Latch::default(),
            complete: Latch::default(),
        })
    }

    pub fn state(&self) -> ImpactState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != ImpactState::Inactive
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Current progress, or `None` while the controller has not been activated.
    pub fn progress(&self) -> Option<f32> {
        self.is_active().then_some(self.progress)
    }

    pub fn near_end_progress(&self) -> f32 {
        self.near_end_progress
    }

    pub fn notified_midpoint(&self) -> bool {
        self.midpoint.is_set()
    }

    pub fn notified_near_end(&self) -> bool {
        self.near_end.is_set()
    }

    pub fn notified_complete(&self) -> bool {
        self.complete.is_set()
    }

    pub fn pose(&self) -> Option<ExplosionPose> {
        self.is_active().then(|| ExplosionPose {
            position: self.origin,
            scale: self.progress * self.config.scale_multiplier,
            spin_z: self.spin_z,
            progress: self.progress,
        })
    }

    /// Start the explosion at `position`. Ignored if already started.
    pub fn activate(&mut self, position: Vec3, now: f64) -> bool {
        if self.is_active() {
            return false;
        }
        self.state = ImpactState::Active;
        self.origin = position;
        self.started_at = now;
        log::debug!(
            "[impact] activated at {:.3}s pos=({:.2},{:.2},{:.2})",
            now,
            position.x,
            position.y,
            position.z
        );
        true
    }

    pub fn tick(&mut self, tick: FrameTick) -> ImpactSignals {
        let mut fired = ImpactSignals::new();
        if self.state != ImpactState::Active {
            return fired;
        }

        let t = (tick.elapsed - self.started_at).max(0.0);
        let finished = t >= self.config.duration_sec;
        let ratio = if finished {
            1.0
        } else {
            ((t / self.config.duration_sec) as f32).min(1.0)
        };
        self.progress = self.progress.max(ratio);
        if !finished {
            self.spin_z += tick.delta * IMPACT_SPIN_Z;
        }

        if self.progress >= self.config.midpoint_progress && self.midpoint.fire() {
            fired.push(ImpactSignal::Midpoint);
        }
        if self.progress >= self.near_end_progress && self.near_end.fire() {
            fired.push(ImpactSignal::NearEnd);
        }
        if finished && self.complete.fire() {
            self.state = ImpactState::Complete;
            fired.push(ImpactSignal::Complete);
        }
        if !fired.is_empty() {
            log::debug!("[impact] t={:.3}s fired {:?}", tick.elapsed, fired);
        }
        fired
    }
}
