use globe_engine::{
    Game, GameConfig, EngineContext,
    InputEvent, InputQueue, MarkerBuffer, CameraUniform,
    ProtocolLayout, FrameHeader, HEADER_FLOATS,
    build_marker_buffer,
};
use crate::links::{BrowserOpener, LinkOpener};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game (e.g., `neo-globe`) creates a `thread_local!` GameRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game, O: LinkOpener = BrowserOpener> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    markers: MarkerBuffer,
    config: GameConfig,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    camera_uniform: CameraUniform,
    opener: O,
    frame: u32,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        Self::with_opener(game, BrowserOpener)
    }
}

impl<G: Game, O: LinkOpener> GameRunner<G, O> {
    pub fn with_opener(game: G, opener: O) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);
        let markers = MarkerBuffer::with_capacity(config.max_markers);
        let camera_uniform = game.camera().uniform();

        Self {
            game,
            ctx: EngineContext::new(),
            input: InputQueue::new(),
            markers,
            layout,
            config,
            header: [0.0; HEADER_FLOATS],
            camera_uniform,
            opener,
            frame: 0,
            initialized: false,
        }
    }

    /// Forward a game-specific JSON payload. Only honoured before init.
    pub fn load_data(&mut self, json: &str) {
        if self.initialized {
            log::warn!("load_data after init ignored");
            return;
        }
        self.game.load_data(json);
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        if self.initialized {
            log::warn!("init called twice, ignoring");
            return;
        }
        self.config = self.game.config();
        self.layout = ProtocolLayout::from_config(&self.config);
        self.markers = MarkerBuffer::with_capacity(self.config.max_markers);
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.publish();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame tick: exactly one game update, then publish.
    /// `_dt` is accepted for host compatibility; animation is per frame.
    pub fn tick(&mut self, _dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        self.game.update(&mut self.ctx, &self.input);
        self.input.drain();
        self.frame = self.frame.wrapping_add(1);

        for url in &self.ctx.open_requests {
            self.opener.open(url);
        }

        self.publish();
    }

    fn publish(&mut self) {
        build_marker_buffer(self.ctx.scene.iter(), &mut self.markers);
        if self.ctx.events.len() > self.layout.max_events {
            log::warn!(
                "{} game events this frame, only {} published",
                self.ctx.events.len(),
                self.layout.max_events
            );
        }

        let camera = self.game.camera();
        self.camera_uniform = camera.uniform();
        FrameHeader {
            frame: self.frame,
            marker_count: self.markers.instance_count(),
            event_count: self.game_events_len(),
            globe_radius: self.config.globe_radius,
            globe_spin: self.game.globe_spin(),
            eye: camera.eye,
            target: camera.target,
            open_requests: self.ctx.open_requests.len() as u32,
        }
        .write_into(&self.layout, &mut self.header);
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn header(&self) -> &[f32; HEADER_FLOATS] {
        &self.header
    }

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn markers(&self) -> &MarkerBuffer {
        &self.markers
    }

    pub fn markers_ptr(&self) -> *const f32 {
        self.markers.instances_ptr()
    }

    pub fn marker_count(&self) -> u32 {
        self.markers.instance_count()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len().min(self.layout.max_events) as u32
    }

    pub fn camera_uniform_ptr(&self) -> *const f32 {
        &self.camera_uniform as *const CameraUniform as *const f32
    }

    pub fn globe_radius(&self) -> f32 {
        self.config.globe_radius
    }

    pub fn globe_spin(&self) -> f32 {
        self.game.globe_spin()
    }

    /// Current visible width. Read from the game so a resize shows up at once.
    pub fn world_width(&self) -> f32 {
        self.game.config().world_width
    }

    pub fn world_height(&self) -> f32 {
        self.game.config().world_height
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_markers(&self) -> u32 {
        self.layout.max_markers as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
