/// NEO Globe: near-Earth objects circling a spinning globe.
///
/// Each body follows an orbit-shaped track across the surface; clicking a
/// marker opens the body's page when it has one. The camera circles the
/// globe until the host switches it to manual drag control.

use globe_engine::*;
use globe_engine::api::game::GameConfig;
use globe_engine::input::queue::{InputEvent, InputQueue};

use crate::bodies::{BodyCatalog, MARKER_BASE_RADIUS, MARKER_COLOR, MARKER_SHININESS};
use crate::orbit;
use crate::picking::PickingService;
use crate::scheduler::AnimationScheduler;
use crate::view::{CameraRig, GlobeFrame};

// ── World layout ─────────────────────────────────────────────────────

const WORLD_W: f32 = 800.0;
const WORLD_H: f32 = 600.0;
/// Radius of the drawn globe surface.
const GLOBE_RADIUS: f32 = 0.5;
const MAX_MARKERS: usize = 64;
/// Size of markers placed by latitude/longitude from the UI.
const MANUAL_MARKER_SIZE: f32 = 0.02;

// ── Custom event kinds from the host ─────────────────────────────────

const CUSTOM_CAMERA_SPEED: u32 = 1;
const CUSTOM_AUTO_ROTATE: u32 = 2;
const CUSTOM_SURFACE_ROTATION: u32 = 3;
const CUSTOM_PLACE_MARKER: u32 = 4;
/// Viewport resize (sent by the worker as kind=99).
const CUSTOM_RESIZE: u32 = 99;

// ── Game event kinds to the host ─────────────────────────────────────

const EVENT_SELECTION: f32 = 1.0;
const EVENT_STATUS: f32 = 2.0;
const EVENT_CAMERA: f32 = 3.0;

pub struct NeoGlobe {
    catalog: BodyCatalog,
    scheduler: AnimationScheduler,
    picking: PickingService,
    globe: GlobeFrame,
    rig: CameraRig,
    /// Marker of the last clicked body, if any.
    selected: Option<EntityId>,
    manual_markers: u32,
    /// Bodies skipped by the last scheduler tick.
    skipped: usize,
    visible_w: f32,
    visible_h: f32,
}

fn config_for(width: f32, height: f32) -> GameConfig {
    GameConfig {
        world_width: width,
        world_height: height,
        globe_radius: GLOBE_RADIUS,
        max_markers: MAX_MARKERS,
        max_events: 32,
    }
}

impl NeoGlobe {
    pub fn new() -> Self {
        Self {
            catalog: BodyCatalog::default(),
            scheduler: AnimationScheduler::new(MARKER_BASE_RADIUS),
            picking: PickingService::default(),
            globe: GlobeFrame::default(),
            rig: CameraRig::new(config_for(WORLD_W, WORLD_H).aspect()),
            selected: None,
            manual_markers: 0,
            skipped: 0,
            visible_w: WORLD_W,
            visible_h: WORLD_H,
        }
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    pub fn globe(&self) -> &GlobeFrame {
        &self.globe
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn selected(&self) -> Option<EntityId> {
        self.selected
    }

    /// Static marker at a geographic coordinate. Never animated.
    fn place_marker(&mut self, ctx: &mut EngineContext, latitude: f32, longitude: f32, height: f32) {
        let (lat, lon, height) = (latitude as f64, longitude as f64, height as f64);
        if !(lat.is_finite() && lon.is_finite() && height.is_finite()) || lat.abs() > 90.0 {
            log::warn!("Marker at ({lat}, {lon}) ignored: not a valid coordinate");
            return;
        }
        if MARKER_BASE_RADIUS + height <= 0.0 {
            log::warn!("Marker at ({lat}, {lon}) ignored: height {height} sinks below the centre");
            return;
        }
        if ctx.scene.len() >= MAX_MARKERS {
            log::warn!("Marker at ({lat}, {lon}) ignored: all {MAX_MARKERS} marker slots are in use");
            return;
        }

        let pos = orbit::surface_placement(lat, lon, MARKER_BASE_RADIUS, height);
        let color = MarkerColor::from_hex(MARKER_COLOR).unwrap_or_default();
        self.manual_markers += 1;
        let id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(id)
                .with_tag(format!("marker-{}", self.manual_markers))
                .with_pos(pos.as_vec3())
                .with_mesh(MeshComponent::sphere(MANUAL_MARKER_SIZE, color).with_shininess(MARKER_SHININESS)),
        );
        log::info!("Placed marker {} at ({lat:.3}, {lon:.3})", id.0);
    }

    fn handle_input(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match event {
                InputEvent::Custom { kind, a, b, c } => match *kind {
                    CUSTOM_CAMERA_SPEED => {
                        if a.is_finite() {
                            self.rig.speed = *a;
                        }
                    }
                    CUSTOM_AUTO_ROTATE => {
                        self.rig.auto_rotate = *a != 0.0;
                    }
                    CUSTOM_SURFACE_ROTATION => {
                        self.globe.set_spin(*a);
                    }
                    CUSTOM_PLACE_MARKER => {
                        self.place_marker(ctx, *a, *b, *c);
                    }
                    CUSTOM_RESIZE => {
                        self.visible_w = *a;
                        self.visible_h = *b;
                        self.rig.resize(*a, *b);
                    }
                    _ => {}
                },
                InputEvent::PointerDown { .. } => {
                    if let Some(ndc) = event.ndc() {
                        self.picking.on_pointer_down(ndc);
                    }
                }
                InputEvent::PointerMove { .. } => {
                    if let Some(delta) = event.ndc().and_then(|ndc| self.picking.on_pointer_move(ndc)) {
                        self.rig.orbit(delta);
                    }
                }
                InputEvent::PointerUp { .. } => {
                    let Some(ndc) = event.ndc() else { continue };
                    let picked = self.picking.on_pointer_up(
                        ndc,
                        &ctx.scene,
                        self.rig.camera(),
                        self.globe.rotation(),
                    );
                    if let Some(outcome) = picked {
                        self.selected = outcome.hit;
                        ctx.emit_event(GameEvent {
                            kind: EVENT_SELECTION,
                            a: outcome.hit.map_or(-1.0, |id| id.0 as f32),
                            b: if outcome.url.is_some() { 1.0 } else { 0.0 },
                            c: 0.0,
                        });
                        if let Some(url) = outcome.url {
                            let body = outcome.hit.and_then(|id| self.scheduler.find_by_marker(id));
                            let name = body.map_or(outcome.name.as_deref().unwrap_or("marker"), |b| b.name());
                            log::info!("Opening {url} for {name}");
                            ctx.request_open(url);
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

impl Default for NeoGlobe {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for NeoGlobe {
    fn config(&self) -> GameConfig {
        config_for(self.visible_w, self.visible_h)
    }

    fn load_data(&mut self, json: &str) {
        match BodyCatalog::from_json(json) {
            Ok(catalog) => {
                log::info!("Loaded catalog with {} bodies", catalog.len());
                self.catalog = catalog;
            }
            Err(err) => log::warn!("Catalog rejected, keeping the current one: {err}"),
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        for desc in self.catalog.bodies() {
            if let Err(err) = self.scheduler.register(desc.clone(), ctx) {
                log::warn!("{err}");
            }
        }
        log::info!(
            "{} of {} bodies animated",
            self.scheduler.len(),
            self.catalog.len()
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        // Input first, so picks see the frame that was drawn.
        self.handle_input(ctx, input);

        self.globe.advance();
        self.rig.advance();
        let report = self.scheduler.tick(&mut ctx.scene);
        self.skipped = report.skipped.len();

        ctx.emit_event(GameEvent {
            kind: EVENT_STATUS,
            a: self.scheduler.len() as f32,
            b: self.skipped as f32,
            c: self.manual_markers as f32,
        });
        ctx.emit_event(GameEvent {
            kind: EVENT_CAMERA,
            a: self.rig.azimuth(),
            b: self.rig.elevation(),
            c: if self.rig.auto_rotate { 1.0 } else { 0.0 },
        });
    }

    fn camera(&self) -> Camera3D {
        self.rig.camera().clone()
    }

    fn globe_spin(&self) -> f32 {
        self.globe.spin
    }
}
