use wasm_bindgen::prelude::*;
use globe_engine::*;

pub mod bodies;
pub mod game;
pub mod orbit;
pub mod picking;
pub mod scheduler;
pub mod view;
use game::NeoGlobe;

globe_web::export_game!(NeoGlobe, "neo-globe");
