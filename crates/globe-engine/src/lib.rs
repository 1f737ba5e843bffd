pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, GameEvent};
pub use components::entity::Entity;
pub use components::mesh::{MeshComponent, MarkerShape, MarkerColor};
pub use core::scene::Scene;
pub use renderer::camera::{Camera3D, CameraUniform};
pub use renderer::marker_instance::{MarkerInstance, MarkerBuffer};
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::{ProtocolLayout, FrameHeader, HEADER_FLOATS};
pub use systems::marker_render::build_marker_buffer;
pub use systems::raycast::{Ray, RayHit, ray_sphere, raycast_nearest};
