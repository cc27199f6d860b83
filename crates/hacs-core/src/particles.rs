//! Debris field thrown out by the impact.
//!
//! Each particle's parameters are drawn once when the field is built. After
//! that a particle's placement is a pure function of the owning impact's
//! progress, its parameters and the impact origin, plus one depth jitter term
//! redrawn every tick. The field keeps no clock of its own.

use crate::config::ParticleConfig;
use crate::error::ConfigError;
use crate::state::ParticleInstance;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DebrisColor {
    Orange,
    Yellow,
}

/// Immutable per-particle parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSeed {
    pub angle: f32,
    pub speed: f32,
    pub size: f32,
    pub color: DebrisColor,
    pub elevation: f32,
}

impl ParticleSeed {
    pub fn sample<R: Rng + ?Sized>(config: &ParticleConfig, rng: &mut R) -> Self {
        let angle = rng.gen_range(0.0..TAU);
        let speed = rng.gen_range(config.speed_range[0]..=config.speed_range[1]);
        let size = rng.gen_range(config.size_range[0]..=config.size_range[1]);
        let color = if rng.gen::<bool>() {
            DebrisColor::Orange
        } else {
            DebrisColor::Yellow
        };
        let elevation = rng.gen_range(config.elevation_range[0]..=config.elevation_range[1]);
        Self {
            angle,
            speed,
            size,
            color,
            elevation,
        }
    }

    /// Radial distance travelled from the origin at `progress`.
    #[inline]
    pub fn distance(&self, progress: f32, config: &ParticleConfig) -> f32 {
        self.speed * progress * config.distance_scale
    }

    /// Placement at `progress` without the per-tick depth jitter.
    pub fn placement(&self, origin: Vec3, progress: f32, config: &ParticleConfig) -> Vec3 {
        let d = self.distance(progress, config);
        origin
            + Vec3::new(
                self.angle.cos() * d,
                self.angle.sin() * d + self.elevation * progress * config.elevation_scale,
                0.0,
            )
    }

    fn rgb(&self, config: &ParticleConfig) -> [f32; 3] {
        match self.color {
            DebrisColor::Orange => config.palette[0],
            DebrisColor::Yellow => config.palette[1],
        }
    }
}

/// Uniform debris opacity for a given impact progress.
#[inline]
pub fn opacity_at(progress: f32) -> f32 {
    (1.0 - progress).clamp(0.0, 1.0)
}

#[derive(Clone, Debug)]
pub struct ParticleField {
    config: ParticleConfig,
    seeds: Vec<ParticleSeed>,
    instances: Vec<ParticleInstance>,
    active: bool,
}

impl ParticleField {
    pub fn new<R: Rng + ?Sized>(config: ParticleConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::generate(config, rng))
    }

    /// Draw a fresh particle set from an already validated config.
    pub(crate) fn generate<R: Rng + ?Sized>(config: ParticleConfig, rng: &mut R) -> Self {
        let seeds: Vec<ParticleSeed> = (0..config.count)
            .map(|_| ParticleSeed::sample(&config, rng))
            .collect();
        let instances = seeds
            .iter()
            .map(|s| {
                let [r, g, b] = s.rgb(&config);
                ParticleInstance {
                    position: [0.0; 3],
                    size: s.size,
                    color: [r, g, b, 1.0],
                }
            })
            .collect();
        Self {
            config,
            seeds,
            instances,
            active: false,
        }
    }

    pub fn seeds(&self) -> &[ParticleSeed] {
        &self.seeds
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Render data for this frame; empty until the owning impact is active.
    pub fn instances(&self) -> &[ParticleInstance] {
        if self.active {
            &self.instances
        } else {
            &[]
        }
    }

    /// Recompute placements from the owner's progress (`None` = owner inactive).
    pub fn update<R: Rng + ?Sized>(&mut self, progress: Option<f32>, origin: Vec3, rng: &mut R) {
        let Some(progress) = progress else {
            self.active = false;
            return;
        };
        self.active = true;

        let opacity = opacity_at(progress);
        if progress >= 1.0 {
            for inst in &mut self.instances {
                inst.color[3] = opacity;
            }
            return;
        }

        for (seed, inst) in self.seeds.iter().zip(self.instances.iter_mut()) {
            let mut p = seed.placement(origin, progress, &self.config);
            let d = seed.distance(progress, &self.config);
            p.z += (rng.gen::<f32>() - 0.5) * d * self.config.jitter_scale;
            inst.position = p.to_array();
            inst.color[3] = opacity;
        }
    }
}
