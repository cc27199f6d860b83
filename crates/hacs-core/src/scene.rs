//! Scene orchestrator: sequences approach -> impact -> debris for one
//! classification result.
//!
//! The branch is decided once per run from the [`Outcome`]. A hazardous run
//! walks `Dormant -> AwaitingImpact -> Resolving -> Settled`; a safe run never
//! builds its timed components and never emits an event.
//!
//! Components are ticked leaves first (background, approach, impact, debris)
//! and the orchestrator reacts to their signals inside the same tick. Events
//! are returned from [`ImpactScene::tick`] and dispatched to subscribers only
//! after every state update of that tick is done.

use crate::approach::{ApproachController, ApproachSignal};
use crate::clock::FrameTick;
use crate::config::{BackgroundConfig, ChoreographyConfig};
use crate::error::ConfigError;
use crate::impact::{ImpactController, ImpactSignal};
use crate::particles::ParticleField;
use crate::result::{ClassificationResult, Outcome, ResultFeed, SceneResetToken};
use crate::state::{BackgroundPose, BodyPose, ExplosionPose, ParticleInstance};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScenePhase {
    Dormant,
    AwaitingImpact,
    Resolving,
    Settled,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneEvent {
    /// The asteroid left its idle position.
    ApproachStarted,
    /// The asteroid reached the impact site; explosion and debris are live.
    Impact { position: Vec3 },
    /// Explosion midpoint; the background planet has just been hidden.
    Midpoint,
    /// Shortly before the explosion ends. No built-in consumer.
    NearEnd,
    /// Explosion finished; nothing else will happen this run.
    Settled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneEventKind {
    ApproachStarted,
    Impact,
    Midpoint,
    NearEnd,
    Settled,
}

impl SceneEvent {
    pub fn kind(&self) -> SceneEventKind {
        match self {
            SceneEvent::ApproachStarted => SceneEventKind::ApproachStarted,
            SceneEvent::Impact { .. } => SceneEventKind::Impact,
            SceneEvent::Midpoint => SceneEventKind::Midpoint,
            SceneEvent::NearEnd => SceneEventKind::NearEnd,
            SceneEvent::Settled => SceneEventKind::Settled,
        }
    }
}

pub type SceneEvents = SmallVec<[SceneEvent; 4]>;

type Hook = Box<dyn FnMut(&SceneEvent)>;

/// Callback registry for visibility/audio collaborators.
#[derive(Default)]
pub struct SceneHooks {
    subscribers: Vec<(SceneEventKind, Hook)>,
}

impl SceneHooks {
    pub fn subscribe(&mut self, kind: SceneEventKind, hook: impl FnMut(&SceneEvent) + 'static) {
        self.subscribers.push((kind, Box::new(hook)));
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    pub fn clear(&mut self) {
        self.subscribers.clear();
    }

    fn dispatch(&mut self, events: &[SceneEvent]) {
        for ev in events {
            let kind = ev.kind();
            for (k, hook) in self.subscribers.iter_mut() {
                if *k == kind {
                    hook(ev);
                }
            }
        }
    }
}

#[derive(Clone, Debug)]
struct Background {
    config: BackgroundConfig,
    rotation_x: f32,
    visible: bool,
    frozen: bool,
}

impl Background {
    fn new(config: BackgroundConfig) -> Self {
        Self {
            config,
            rotation_x: 0.0,
            visible: true,
            frozen: false,
        }
    }

    fn tick(&mut self, delta: f32) {
        if !self.frozen {
            self.rotation_x += delta * self.config.spin_x;
        }
    }

    fn pose(&self) -> BackgroundPose {
        BackgroundPose {
            position: self.config.position,
            rotation_x: self.rotation_x,
            visible: self.visible,
            frozen: self.frozen,
        }
    }
}

/// Timed components of a hazardous run.
#[derive(Clone, Debug)]
struct Choreography {
    approach: ApproachController,
    impact: ImpactController,
    particles: ParticleField,
}

#[derive(Clone, Debug)]
enum Branch {
    Hazardous(Box<Choreography>),
    Safe,
}

pub struct ImpactScene<R: Rng = StdRng> {
    config: ChoreographyConfig,
    approach_template: ApproachController,
    impact_template: ImpactController,
    token: SceneResetToken,
    outcome: Outcome,
    branch: Branch,
    phase: ScenePhase,
    background: Background,
    mounted_at: Option<f64>,
    hooks: SceneHooks,
    rng: R,
}

impl ImpactScene<StdRng> {
    /// Scene with a seeded random source.
    pub fn seeded(config: ChoreographyConfig, outcome: Outcome, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(
            config,
            SceneResetToken::default(),
            outcome,
            StdRng::seed_from_u64(seed),
        )
    }
}

impl<R: Rng> ImpactScene<R> {
    pub fn with_rng(
        config: ChoreographyConfig,
        token: SceneResetToken,
        outcome: Outcome,
        mut rng: R,
    ) -> Result<Self, ConfigError> {
        let approach_template = ApproachController::new(config.approach.clone())?;
        let impact_template = ImpactController::new(config.impact.clone())?;
        config.particles.validate()?;
        let branch = match outcome {
            Outcome::Hazardous => Branch::Hazardous(Box::new(Choreography {
                approach: approach_template.clone(),
                impact: impact_template.clone(),
                particles: ParticleField::generate(config.particles.clone(), &mut rng),
            })),
            Outcome::Safe => Branch::Safe,
        };
        log::info!("[scene] mounted token={} outcome={:?}", token.value(), outcome);
        Ok(Self {
            background: Background::new(config.background.clone()),
            config,
            approach_template,
            impact_template,
            token,
            outcome,
            branch,
            phase: ScenePhase::Dormant,
            mounted_at: None,
            hooks: SceneHooks::default(),
            rng,
        })
    }

    pub fn config(&self) -> &ChoreographyConfig {
        &self.config
    }

    pub fn token(&self) -> SceneResetToken {
        self.token
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    pub fn hooks_mut(&mut self) -> &mut SceneHooks {
        &mut self.hooks
    }

    pub fn subscribe(&mut self, kind: SceneEventKind, hook: impl FnMut(&SceneEvent) + 'static) {
        self.hooks.subscribe(kind, hook);
    }

    /// Start a new run if `token` differs from the current one.
    ///
    /// All timers, latches and particle parameters of the previous run are
    /// dropped synchronously; subscriptions are kept.
    pub fn reset(&mut self, token: SceneResetToken, outcome: Outcome) -> bool {
        if token == self.token {
            return false;
        }
        self.branch = match outcome {
            Outcome::Hazardous => Branch::Hazardous(Box::new(Choreography {
                approach: self.approach_template.clone(),
                impact: self.impact_template.clone(),
                particles: ParticleField::generate(self.config.particles.clone(), &mut self.rng),
            })),
            Outcome::Safe => Branch::Safe,
        };
        self.token = token;
        self.outcome = outcome;
        self.phase = ScenePhase::Dormant;
        self.background = Background::new(self.config.background.clone());
        self.mounted_at = None;
        log::info!("[scene] reset token={} outcome={:?}", token.value(), outcome);
        true
    }

    /// Accept a classifier result: issue a new token and restart the scene.
    pub fn apply_result(&mut self, feed: &mut ResultFeed, result: ClassificationResult) -> SceneResetToken {
        let token = feed.accept(result);
        self.reset(token, result.outcome());
        token
    }

    pub fn asteroid(&self) -> Option<BodyPose> {
        match &self.branch {
            Branch::Hazardous(c) => Some(c.approach.pose()),
            Branch::Safe => None,
        }
    }

    pub fn explosion(&self) -> Option<ExplosionPose> {
        match &self.branch {
            Branch::Hazardous(c) => c.impact.pose(),
            Branch::Safe => None,
        }
    }

    pub fn particles(&self) -> &[ParticleInstance] {
        match &self.branch {
            Branch::Hazardous(c) => c.particles.instances(),
            Branch::Safe => &[],
        }
    }

    pub fn background(&self) -> BackgroundPose {
        self.background.pose()
    }

    pub fn approach(&self) -> Option<&ApproachController> {
        match &self.branch {
            Branch::Hazardous(c) => Some(&c.approach),
            Branch::Safe => None,
        }
    }

    pub fn impact(&self) -> Option<&ImpactController> {
        match &self.branch {
            Branch::Hazardous(c) => Some(&c.impact),
            Branch::Safe => None,
        }
    }

    pub fn particle_field(&self) -> Option<&ParticleField> {
        match &self.branch {
            Branch::Hazardous(c) => Some(&c.particles),
            Branch::Safe => None,
        }
    }

    /// Advance one render frame. Returns the events newly fired by this tick.
    pub fn tick(&mut self, tick: FrameTick) -> SceneEvents {
        let mut events = SceneEvents::new();
        let mounted_at = *self.mounted_at.get_or_insert(tick.elapsed);
        let since_mount = tick.elapsed - mounted_at;

        self.background.tick(tick.delta);

        let Branch::Hazardous(c) = &mut self.branch else {
            return events;
        };

        if self.phase == ScenePhase::Dormant
            && c.approach.delay_elapsed(since_mount)
            && c.approach.activate(tick.elapsed)
        {
            self.phase = ScenePhase::AwaitingImpact;
            log::info!("[scene] approach started at {:.3}s", tick.elapsed);
            events.push(SceneEvent::ApproachStarted);
        }

        if let Some(ApproachSignal::Completed) = c.approach.tick(tick) {
            let position = self.config.impact.position;
            if c.impact.activate(position, tick.elapsed) {
                self.background.frozen = true;
                self.phase = ScenePhase::Resolving;
                log::info!("[scene] impact at {:.3}s", tick.elapsed);
                events.push(SceneEvent::Impact { position });
            }
        }

        for signal in c.impact.tick(tick) {
            match signal {
                ImpactSignal::Midpoint => {
                    self.background.visible = false;
                    events.push(SceneEvent::Midpoint);
                }
                ImpactSignal::NearEnd => events.push(SceneEvent::NearEnd),
                ImpactSignal::Complete => {
                    self.phase = ScenePhase::Settled;
                    log::info!("[scene] settled at {:.3}s", tick.elapsed);
                    events.push(SceneEvent::Settled);
                }
            }
        }

        c.particles
            .update(c.impact.progress(), c.impact.origin(), &mut self.rng);

        self.hooks.dispatch(&events);
        events
    }
}
