/// Per-frame animation of catalog bodies along their surface tracks.
///
/// The scheduler owns every body's phase. Each tick advances all phases in
/// registration order and repositions the matching markers in the scene.

use globe_engine::*;

use crate::bodies::{BodyDesc, MARKER_COLOR, MARKER_SHININESS};
use crate::orbit::{self, OrbitError};

/// Advance a phase by `velocity` degrees, wrapping into [0, 360).
pub fn advance_phase(phase: f64, velocity: f64) -> f64 {
    let next = (phase + velocity + 360.0).rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if next >= 360.0 {
        0.0
    } else {
        next
    }
}

/// A registered body: its description, current phase and marker.
#[derive(Debug, Clone)]
pub struct TrackedBody {
    desc: BodyDesc,
    phase: f64,
    marker: EntityId,
}

impl TrackedBody {
    pub fn name(&self) -> &str {
        &self.desc.name
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn marker(&self) -> EntityId {
        self.marker
    }

    pub fn desc(&self) -> &BodyDesc {
        &self.desc
    }
}

/// Outcome of one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Markers repositioned this tick.
    pub updated: usize,
    /// Bodies whose position was undefined this tick; their markers kept
    /// the previous position.
    pub skipped: Vec<String>,
}

pub struct AnimationScheduler {
    base_radius: f64,
    bodies: Vec<TrackedBody>,
}

impl AnimationScheduler {
    pub fn new(base_radius: f64) -> Self {
        Self {
            base_radius,
            bodies: Vec::new(),
        }
    }

    pub fn base_radius(&self) -> f64 {
        self.base_radius
    }

    /// Validate `desc`, place it at phase 0 and spawn its marker.
    /// A rejected body never enters the scene.
    pub fn register(&mut self, desc: BodyDesc, ctx: &mut EngineContext) -> Result<EntityId, OrbitError> {
        if self.bodies.iter().any(|b| b.desc.name == desc.name) {
            return Err(OrbitError::InvalidOrbitalParameters {
                name: desc.name,
                reason: "name is already registered".to_string(),
            });
        }
        desc.validate(self.base_radius)?;
        let start = orbit::place_body(&desc, 0.0, self.base_radius)?;

        let color = MarkerColor::from_hex(MARKER_COLOR).unwrap_or_default();
        let id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(id)
                .with_tag(desc.name.clone())
                .with_pos(start.as_vec3())
                .with_mesh(MeshComponent::sphere(desc.size as f32, color).with_shininess(MARKER_SHININESS))
                .with_link(desc.url.clone()),
        );
        log::info!(
            "Registered {} (a={}, e={}, i={}, v={}) as marker {}",
            desc.name, desc.a, desc.e, desc.i, desc.velocity, id.0
        );

        self.bodies.push(TrackedBody {
            desc,
            phase: 0.0,
            marker: id,
        });
        Ok(id)
    }

    /// Advance every body one frame and move its marker.
    pub fn tick(&mut self, scene: &mut Scene) -> TickReport {
        let mut report = TickReport::default();
        for body in &mut self.bodies {
            body.phase = advance_phase(body.phase, body.desc.velocity);
            match orbit::place_body(&body.desc, body.phase, self.base_radius) {
                Ok(pos) => {
                    if scene.set_position(body.marker, pos.as_vec3()) {
                        report.updated += 1;
                    }
                }
                Err(err) => {
                    log::warn!("Skipping {} at phase {:.3}: {err}", body.desc.name, body.phase);
                    report.skipped.push(body.desc.name.clone());
                }
            }
        }
        report
    }

    pub fn find_by_marker(&self, id: EntityId) -> Option<&TrackedBody> {
        self.bodies.iter().find(|b| b.marker == id)
    }

    pub fn bodies(&self) -> impl Iterator<Item = &TrackedBody> {
        self.bodies.iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
