use crate::components::entity::Entity;
use crate::renderer::marker_instance::{MarkerBuffer, MarkerInstance};

/// Build the marker instance buffer from entities with mesh components.
/// Returns the number of entities dropped because the buffer was full.
pub fn build_marker_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    buffer: &mut MarkerBuffer,
) -> usize {
    buffer.clear();
    let mut dropped = 0;
    for entity in entities {
        if !entity.active {
            continue;
        }
        let mesh = match &entity.mesh {
            Some(m) => m,
            None => continue,
        };
        let pushed = buffer.push(MarkerInstance {
            x: entity.pos.x,
            y: entity.pos.y,
            z: entity.pos.z,
            radius: mesh.bounding_radius() * entity.scale,
            r: mesh.color.r,
            g: mesh.color.g,
            b: mesh.color.b,
            shininess: mesh.shininess,
        });
        if !pushed {
            dropped += 1;
        }
    }
    if dropped > 0 {
        log::warn!("marker buffer full: {} markers not drawn", dropped);
    }
    dropped
}
