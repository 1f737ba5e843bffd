use serde::{Deserialize, Serialize};
use crate::core::scene::Scene;
use crate::api::types::{EntityId, GameEvent};
use crate::input::queue::InputQueue;
use crate::renderer::camera::Camera3D;

/// Configuration for the engine, provided by the game.
/// Every field has a default, so a host may send a partial JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Viewport width in pixels (used for the camera aspect ratio).
    pub world_width: f32,
    /// Viewport height in pixels.
    pub world_height: f32,
    /// Nominal radius of the globe surface markers are anchored to.
    pub globe_radius: f32,
    /// Maximum number of marker instances (default: 64).
    pub max_markers: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 600.0,
            globe_radius: 0.5,
            max_markers: 64,
            max_events: 32,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn aspect(&self) -> f32 {
        if self.world_height > 0.0 {
            self.world_width / self.world_height
        } else {
            1.0
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn markers, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One frame tick. Runs exactly once per display refresh.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Game-specific JSON payload supplied by the host before init
    /// (e.g. a body catalog). Games report problems through `log`.
    fn load_data(&mut self, _json: &str) {}

    /// Camera published to the host after each tick.
    fn camera(&self) -> Camera3D {
        Camera3D::default()
    }

    /// Globe surface rotation about +Y (radians) published to the host.
    fn globe_spin(&self) -> f32 {
        0.0
    }
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub events: Vec<GameEvent>,
    /// URLs the game asked the host to open this frame.
    pub open_requests: Vec<String>,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            events: Vec::new(),
            open_requests: Vec::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to TypeScript.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Ask the host to open an external resource.
    pub fn request_open(&mut self, url: impl Into<String>) {
        self.open_requests.push(url.into());
    }

    /// Clear per-frame transient data (events, open requests).
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
        self.open_requests.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
