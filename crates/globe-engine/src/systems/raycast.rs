//! Ray casting against sphere-bounded entities.
//!
//! Markers are small spheres, so their bounding sphere *is* their geometry;
//! the nearest positive intersection along the ray wins.

use glam::{Quat, Vec3};
use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// A half-line in world space. `dir` is unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// Build a ray; the direction is normalized. Returns None for a zero direction.
    pub fn new(origin: Vec3, dir: Vec3) -> Option<Self> {
        let dir = dir.try_normalize()?;
        Some(Self { origin, dir })
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Nearest hit produced by [`raycast_nearest`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub id: EntityId,
    /// Distance along the ray to the entry point.
    pub distance: f32,
    /// World-space entry point.
    pub point: Vec3,
}

/// Distance along `ray` to the first intersection with the sphere, if any.
/// A ray starting inside the sphere reports the exit point.
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.dir);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sqrt_disc = disc.sqrt();
    let near = -b - sqrt_disc;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + sqrt_disc;
    (far >= 0.0).then_some(far)
}

/// Cast `ray` against every active, meshed entity. Entity positions are in
/// the frame given by `frame` (e.g. a spinning globe surface) and are
/// rotated into world space before testing.
pub fn raycast_nearest<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    frame: Quat,
    ray: &Ray,
) -> Option<RayHit> {
    let mut best: Option<RayHit> = None;
    for entity in entities {
        if !entity.active {
            continue;
        }
        let radius = match entity.bounding_radius() {
            Some(r) if r > 0.0 => r,
            _ => continue,
        };
        let center = frame * entity.pos;
        if let Some(distance) = ray_sphere(ray, center, radius) {
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(RayHit {
                    id: entity.id,
                    distance,
                    point: ray.at(distance),
                });
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::{MarkerColor, MeshComponent};

    fn marker(id: u32, pos: Vec3, radius: f32) -> Entity {
        Entity::new(EntityId(id))
            .with_pos(pos)
            .with_mesh(MeshComponent::sphere(radius, MarkerColor::default()))
    }

    #[test]
    fn ray_hits_sphere_in_front() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z).unwrap();
        let t = ray_sphere(&ray, Vec3::ZERO, 1.0).unwrap();
        assert!((t - 4.0).abs() < 1e-5, "t = {t}");
    }

    #[test]
    fn ray_misses_sphere_behind() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z).unwrap();
        assert!(ray_sphere(&ray, Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn ray_from_inside_reports_exit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X).unwrap();
        let t = ray_sphere(&ray, Vec3::ZERO, 2.0).unwrap();
        assert!((t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn zero_direction_is_rejected() {
        assert!(Ray::new(Vec3::ONE, Vec3::ZERO).is_none());
    }

    #[test]
    fn nearest_of_two_wins() {
        let far = marker(1, Vec3::new(0.0, 0.0, -2.0), 0.1);
        let near = marker(2, Vec3::new(0.0, 0.0, 1.0), 0.1);
        let entities = vec![far, near];
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z).unwrap();
        let hit = raycast_nearest(entities.iter(), Quat::IDENTITY, &ray).unwrap();
        assert_eq!(hit.id, EntityId(2));
        assert!((hit.point.z - 1.1).abs() < 1e-5);
    }

    #[test]
    fn inactive_and_meshless_are_skipped() {
        let mut hidden = marker(1, Vec3::ZERO, 0.5);
        hidden.active = false;
        let bare = Entity::new(EntityId(2));
        let entities = vec![hidden, bare];
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z).unwrap();
        assert!(raycast_nearest(entities.iter(), Quat::IDENTITY, &ray).is_none());
    }

    #[test]
    fn frame_rotation_moves_targets() {
        // Local +X rotated a quarter turn about Y lands on world -Z.
        let e = marker(3, Vec3::X, 0.1);
        let frame = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z).unwrap();
        let hit = raycast_nearest(std::iter::once(&e), frame, &ray);
        assert_eq!(hit.map(|h| h.id), Some(EntityId(3)));

        let unrotated = raycast_nearest(std::iter::once(&e), Quat::IDENTITY, &ray);
        assert!(unrotated.is_none());
    }
}
