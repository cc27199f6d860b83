use hacs_core::{FrameClock, ImpactScene, SceneEvent};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineEntry {
    pub at: f64,
    pub event: SceneEvent,
}

/// Drive `scene` at a fixed `fps` from `clock`'s current time for `seconds`.
///
/// `on_frame` runs before each tick with the upcoming elapsed time, which lets
/// the caller inject a new classification result mid-run.
pub fn simulate(
    scene: &mut ImpactScene,
    clock: &mut FrameClock,
    fps: f32,
    seconds: f64,
    mut on_frame: impl FnMut(&mut ImpactScene, f64),
) -> Vec<TimelineEntry> {
    let step = 1.0 / fps;
    let frames = (seconds * fps as f64).ceil() as u64;
    let mut out = Vec::new();
    // First frame mounts the scene at the current time.
    let mut tick = clock.advance(0.0);
    for frame in 0..=frames {
        if frame > 0 {
            tick = clock.advance(step);
        }
        on_frame(scene, tick.elapsed);
        for event in scene.tick(tick) {
            out.push(TimelineEntry {
                at: tick.elapsed,
                event,
            });
        }
    }
    out
}

/// One-shot redelivery of a result at a simulated time.
#[derive(Clone, Copy, Debug)]
pub struct Replay {
    at: Option<f64>,
    done: bool,
}

impl Replay {
    pub fn new(at: Option<f64>) -> Self {
        Self { at, done: false }
    }

    /// True on the first frame at or after the replay time, never again.
    pub fn due(&mut self, t: f64) -> bool {
        if self.done || !self.at.is_some_and(|at| t >= at) {
            return false;
        }
        self.done = true;
        true
    }
}

pub fn describe(event: &SceneEvent) -> String {
    match event {
        SceneEvent::ApproachStarted => "asteroid approach started".to_string(),
        SceneEvent::Impact { position } => format!(
            "impact at ({:.1}, {:.1}, {:.1})",
            position.x, position.y, position.z
        ),
        SceneEvent::Midpoint => "explosion midpoint: planet hidden".to_string(),
        SceneEvent::NearEnd => "explosion near end".to_string(),
        SceneEvent::Settled => "explosion settled".to_string(),
    }
}
