pub mod marker_render;
pub mod raycast;
