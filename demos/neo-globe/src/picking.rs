/// Click-to-marker resolution.
///
/// A click is a pointer down/up pair that stays within a small NDC radius;
/// anything longer is a drag and belongs to the camera rig.

use glam::{Quat, Vec2};
use globe_engine::*;

/// Pointer travel (NDC units) before a press becomes a drag.
pub const DRAG_THRESHOLD: f32 = 0.02;

/// Result of a pick. Empty when the ray misses every marker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickOutcome {
    pub hit: Option<EntityId>,
    pub name: Option<String>,
    pub url: Option<String>,
}

impl PickOutcome {
    pub fn is_hit(&self) -> bool {
        self.hit.is_some()
    }
}

/// Nearest marker under `ndc`. Marker positions are surface-local and are
/// rotated by `frame` before testing. Reads the scene only.
pub fn query(scene: &Scene, camera: &Camera3D, frame: Quat, ndc: Vec2) -> PickOutcome {
    let Some(ray) = camera.ray_from_ndc(ndc) else {
        return PickOutcome::default();
    };
    let Some(hit) = raycast_nearest(scene.iter(), frame, &ray) else {
        return PickOutcome::default();
    };
    match scene.get(hit.id) {
        Some(entity) => PickOutcome {
            hit: Some(hit.id),
            name: Some(entity.tag.clone()),
            url: entity.link.clone(),
        },
        None => PickOutcome::default(),
    }
}

/// Tracks the pointer between press and release to tell clicks from drags.
#[derive(Debug, Clone)]
pub struct PickingService {
    pressed_at: Option<Vec2>,
    last: Vec2,
    dragged: bool,
    drag_threshold: f32,
}

impl Default for PickingService {
    fn default() -> Self {
        Self::new(DRAG_THRESHOLD)
    }
}

impl PickingService {
    pub fn new(drag_threshold: f32) -> Self {
        Self {
            pressed_at: None,
            last: Vec2::ZERO,
            dragged: false,
            drag_threshold,
        }
    }

    pub fn on_pointer_down(&mut self, ndc: Vec2) {
        self.pressed_at = Some(ndc);
        self.last = ndc;
        self.dragged = false;
    }

    /// Pointer moved. Returns the NDC delta since the last move while the
    /// pointer is held down and the press has turned into a drag.
    pub fn on_pointer_move(&mut self, ndc: Vec2) -> Option<Vec2> {
        let start = self.pressed_at?;
        if !self.dragged && ndc.distance(start) > self.drag_threshold {
            self.dragged = true;
        }
        let delta = ndc - self.last;
        self.last = ndc;
        self.dragged.then_some(delta)
    }

    /// Pointer released. A click (no drag) is resolved against the scene.
    pub fn on_pointer_up(
        &mut self,
        ndc: Vec2,
        scene: &Scene,
        camera: &Camera3D,
        frame: Quat,
    ) -> Option<PickOutcome> {
        let start = self.pressed_at.take()?;
        let dragged = self.dragged || ndc.distance(start) > self.drag_threshold;
        self.dragged = false;
        if dragged {
            return None;
        }
        let outcome = query(scene, camera, frame, ndc);
        log::debug!("Pick at ({:.3}, {:.3}): {:?}", ndc.x, ndc.y, outcome.name);
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn camera() -> Camera3D {
        let mut cam = Camera3D::new(4.0 / 3.0);
        cam.look_at(Vec3::new(0.0, 0.0, 2.0), Vec3::ZERO);
        cam
    }

    fn scene_with(markers: &[(&str, Vec3, Option<&str>)]) -> Scene {
        let mut scene = Scene::new();
        for (idx, (name, pos, url)) in markers.iter().enumerate() {
            scene.spawn(
                Entity::new(EntityId(idx as u32 + 1))
                    .with_tag(*name)
                    .with_pos(*pos)
                    .with_mesh(MeshComponent::sphere(0.03, MarkerColor::default()))
                    .with_link(url.map(str::to_string)),
            );
        }
        scene
    }

    #[test]
    fn ray_through_marker_hits_it() {
        let scene = scene_with(&[
            ("TG45", Vec3::new(0.2, 0.1, 0.7), Some("https://example.org/tg45")),
            ("XZ130", Vec3::new(-0.3, -0.2, 0.6), None),
        ]);
        let cam = camera();

        let ndc = cam.project(Vec3::new(0.2, 0.1, 0.7)).unwrap();
        let outcome = query(&scene, &cam, Quat::IDENTITY, ndc);
        assert_eq!(outcome.hit, Some(EntityId(1)));
        assert_eq!(outcome.name.as_deref(), Some("TG45"));
        assert_eq!(outcome.url.as_deref(), Some("https://example.org/tg45"));

        let ndc = cam.project(Vec3::new(-0.3, -0.2, 0.6)).unwrap();
        let outcome = query(&scene, &cam, Quat::IDENTITY, ndc);
        assert_eq!(outcome.hit, Some(EntityId(2)));
        assert_eq!(outcome.url, None);
    }

    #[test]
    fn empty_space_between_markers_misses() {
        let scene = scene_with(&[
            ("left", Vec3::new(-0.3, 0.0, 0.7), None),
            ("right", Vec3::new(0.3, 0.0, 0.7), None),
        ]);
        let cam = camera();
        let ndc = cam.project(Vec3::new(0.0, 0.0, 0.7)).unwrap();
        assert_eq!(query(&scene, &cam, Quat::IDENTITY, ndc), PickOutcome::default());
    }

    #[test]
    fn nearer_marker_wins() {
        let scene = scene_with(&[
            ("far", Vec3::new(0.0, 0.0, 0.4), None),
            ("near", Vec3::new(0.0, 0.0, 0.9), None),
        ]);
        let outcome = query(&scene, &camera(), Quat::IDENTITY, Vec2::ZERO);
        assert_eq!(outcome.name.as_deref(), Some("near"));
    }

    #[test]
    fn globe_spin_moves_the_target() {
        // Surface-local +x lands on +z after a -90° spin, in front of the camera.
        let scene = scene_with(&[("spun", Vec3::new(0.7, 0.0, 0.0), None)]);
        let frame = Quat::from_rotation_y(-std::f32::consts::FRAC_PI_2);
        let outcome = query(&scene, &camera(), frame, Vec2::ZERO);
        assert_eq!(outcome.name.as_deref(), Some("spun"));

        let outcome = query(&scene, &camera(), Quat::IDENTITY, Vec2::ZERO);
        assert!(!outcome.is_hit());
    }

    #[test]
    fn click_resolves_but_drag_does_not() {
        let scene = scene_with(&[("m", Vec3::new(0.0, 0.0, 0.7), None)]);
        let cam = camera();
        let mut picking = PickingService::default();

        picking.on_pointer_down(Vec2::ZERO);
        assert_eq!(picking.on_pointer_move(Vec2::new(0.005, 0.0)), None);
        let outcome = picking.on_pointer_up(Vec2::new(0.005, 0.0), &scene, &cam, Quat::IDENTITY);
        assert_eq!(outcome.unwrap().name.as_deref(), Some("m"));

        picking.on_pointer_down(Vec2::ZERO);
        let delta = picking.on_pointer_move(Vec2::new(0.2, 0.0)).unwrap();
        assert!((delta.x - 0.2).abs() < 1e-6);
        assert_eq!(picking.on_pointer_up(Vec2::ZERO, &scene, &cam, Quat::IDENTITY), None);
    }

    #[test]
    fn release_without_press_is_ignored() {
        let scene = scene_with(&[("m", Vec3::new(0.0, 0.0, 0.7), None)]);
        let mut picking = PickingService::default();
        assert_eq!(picking.on_pointer_up(Vec2::ZERO, &scene, &camera(), Quat::IDENTITY), None);
        assert_eq!(picking.on_pointer_move(Vec2::ONE), None);
    }
}
