//! Host clock adapter.
//!
//! The render host owns time. [`FrameClock`] only turns what the host reports
//! into [`FrameTick`]s the engine can trust: elapsed time never goes backwards
//! and deltas are never negative.

/// One render-loop step as seen by the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTick {
    /// Seconds since the host clock started.
    pub elapsed: f64,
    /// Seconds since the previous tick.
    pub delta: f32,
}

impl FrameTick {
    pub fn new(elapsed: f64, delta: f32) -> Self {
        Self { elapsed, delta }
    }
}

#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    elapsed: f64,
    started: bool,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Record a host timestamp. Regressions are clamped to the last seen time.
    pub fn observe(&mut self, elapsed: f64) -> FrameTick {
        if !elapsed.is_finite() {
            log::warn!("[clock] ignoring non-finite timestamp {elapsed}");
            return FrameTick::new(self.elapsed, 0.0);
        }
        if !self.started {
            self.started = true;
            self.elapsed = elapsed.max(0.0);
            return FrameTick::new(self.elapsed, 0.0);
        }
        if elapsed < self.elapsed {
            log::warn!(
                "[clock] host time went backwards ({:.4} < {:.4}); clamping",
                elapsed,
                self.elapsed
            );
            return FrameTick::new(self.elapsed, 0.0);
        }
        let delta = (elapsed - self.elapsed) as f32;
        self.elapsed = elapsed;
        FrameTick::new(elapsed, delta)
    }

    /// Fixed-step advancement for headless hosts.
    pub fn advance(&mut self, delta: f32) -> FrameTick {
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        self.started = true;
        self.elapsed += delta as f64;
        FrameTick::new(self.elapsed, delta)
    }
}

/// Maps a second host time source onto an existing [`FrameClock`] timeline.
///
/// Used when a host hands the scene to another loop (page-driven ticks, then
/// the crate's own animation frames) whose timer restarts at zero. Local time
/// `0` lands on the last elapsed time the clock reported, so mount and
/// activation timestamps recorded earlier stay valid.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TimeBase {
    origin: f64,
}

impl TimeBase {
    pub fn continuing(clock: &FrameClock) -> Self {
        Self {
            origin: clock.elapsed(),
        }
    }

    pub fn origin(&self) -> f64 {
        self.origin
    }

    /// Scene time for `local` seconds on the new source.
    #[inline]
    pub fn to_scene(&self, local: f64) -> f64 {
        self.origin + local
    }
}
