//! Visual-side state shared with the hosts.
//!
//! These types avoid referencing platform-specific APIs. A host reads them
//! after each tick and maps them onto whatever meshes, DOM nodes or GPU buffers
//! it owns; the engine never learns how they are drawn.

use glam::Vec3;

/// Transform of the crashing body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyPose {
    pub position: Vec3,
    pub scale: f32,
    /// Accumulated Euler rotation in radians.
    pub rotation: Vec3,
}

/// Transform of the explosion group around the impact site.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExplosionPose {
    pub position: Vec3,
    pub scale: f32,
    pub spin_z: f32,
    pub progress: f32,
}

/// The planet behind the impact site.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundPose {
    pub position: Vec3,
    pub rotation_x: f32,
    pub visible: bool,
    pub frozen: bool,
}

/// Per-particle render data laid out for direct upload as a flat `f32` buffer.
///
/// `color[3]` carries the opacity.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

impl ParticleInstance {
    pub const FLOATS: usize = 8;

    pub fn opacity(&self) -> f32 {
        self.color[3]
    }
}
