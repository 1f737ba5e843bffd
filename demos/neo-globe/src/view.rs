/// Globe spin and the camera rig circling it.

use glam::{Quat, Vec2, Vec3};
use globe_engine::Camera3D;

/// Default surface spin per frame, in radians.
pub const DEFAULT_SPIN_RATE: f32 = 1.0 / 32.0 * 0.01;

const RIG_DISTANCE: f32 = 2.0;
const RIG_SPEED: f32 = 0.001;
/// Radians of orbit per NDC unit of pointer travel.
const DRAG_SENSITIVITY: f32 = 2.0;
const MAX_ELEVATION: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// The spinning surface frame markers are anchored to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobeFrame {
    /// Rotation about +Y, radians.
    pub spin: f32,
    pub spin_rate: f32,
}

impl Default for GlobeFrame {
    fn default() -> Self {
        Self {
            spin: 0.0,
            spin_rate: DEFAULT_SPIN_RATE,
        }
    }
}

impl GlobeFrame {
    pub fn advance(&mut self) {
        self.spin = (self.spin + self.spin_rate).rem_euclid(std::f32::consts::TAU);
    }

    pub fn set_spin(&mut self, spin: f32) {
        if spin.is_finite() {
            self.spin = spin.rem_euclid(std::f32::consts::TAU);
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.spin)
    }

    /// Surface-local point in world space.
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.rotation() * local
    }
}

/// Perspective camera that either circles the globe on its own or follows
/// pointer drags.
#[derive(Debug, Clone)]
pub struct CameraRig {
    azimuth: f32,
    elevation: f32,
    distance: f32,
    pub speed: f32,
    pub auto_rotate: bool,
    camera: Camera3D,
}

impl CameraRig {
    pub fn new(aspect: f32) -> Self {
        let mut rig = Self {
            azimuth: 0.0,
            elevation: 0.0,
            distance: RIG_DISTANCE,
            speed: RIG_SPEED,
            auto_rotate: true,
            camera: Camera3D::new(aspect),
        };
        rig.sync();
        rig
    }

    pub fn camera(&self) -> &Camera3D {
        &self.camera
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn elevation(&self) -> f32 {
        self.elevation
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.resize(width, height);
    }

    /// One frame. Auto-rotation keeps the camera level on its circle.
    pub fn advance(&mut self) {
        if !self.auto_rotate {
            return;
        }
        self.azimuth += self.speed;
        self.elevation = 0.0;
        self.sync();
    }

    /// Orbit by a pointer drag (NDC delta). Ignored while auto-rotating.
    pub fn orbit(&mut self, delta: Vec2) {
        if self.auto_rotate {
            return;
        }
        self.azimuth -= delta.x * DRAG_SENSITIVITY;
        self.elevation = (self.elevation - delta.y * DRAG_SENSITIVITY).clamp(-MAX_ELEVATION, MAX_ELEVATION);
        self.sync();
    }

    fn sync(&mut self) {
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        let (sin_el, cos_el) = self.elevation.sin_cos();
        let eye = Vec3::new(sin_az * cos_el, sin_el, cos_az * cos_el) * self.distance;
        self.camera.look_at(eye, Vec3::ZERO);
    }
}
