pub mod links;
pub mod runner;

pub use links::{BrowserOpener, LinkOpener, RecordingOpener};
pub use runner::GameRunner;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (game_init, game_tick, input handlers, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use globe_engine::*;
///
/// mod game;
/// use game::MyGlobe;
///
/// globe_web::export_game!(MyGlobe, "my-globe");
/// ```
///
/// The host calls `game_create()`, optionally `game_load_data(json)`, then
/// `game_init()`. Pointer coordinates are NDC.
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.get_or_insert_with(|| $crate::GameRunner::new(<$game_type>::new()));
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn game_create() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);
            with_runner(|_| ());
        }

        #[wasm_bindgen]
        pub fn game_load_data(json: &str) {
            with_runner(|r| r.load_data(json));
        }

        #[wasm_bindgen]
        pub fn game_init() {
            game_create();
            with_runner(|r| r.init());
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_header_ptr() -> *const f32 {
            with_runner(|r| r.header_ptr())
        }

        #[wasm_bindgen]
        pub fn get_markers_ptr() -> *const f32 {
            with_runner(|r| r.markers_ptr())
        }

        #[wasm_bindgen]
        pub fn get_marker_count() -> u32 {
            with_runner(|r| r.marker_count())
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len())
        }

        #[wasm_bindgen]
        pub fn get_camera_uniform_ptr() -> *const f32 {
            with_runner(|r| r.camera_uniform_ptr())
        }

        #[wasm_bindgen]
        pub fn get_globe_radius() -> f32 {
            with_runner(|r| r.globe_radius())
        }

        #[wasm_bindgen]
        pub fn get_globe_spin() -> f32 {
            with_runner(|r| r.globe_spin())
        }

        #[wasm_bindgen]
        pub fn get_world_width() -> f32 {
            with_runner(|r| r.world_width())
        }

        #[wasm_bindgen]
        pub fn get_world_height() -> f32 {
            with_runner(|r| r.world_height())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_markers() -> u32 {
            with_runner(|r| r.max_markers())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }
    };
}
