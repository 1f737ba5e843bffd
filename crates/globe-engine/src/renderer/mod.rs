pub mod camera;
pub mod marker_instance;
