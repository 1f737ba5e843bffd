/// SharedArrayBuffer layout.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Markers: max_markers × 8 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// TypeScript reads them from the header to compute offsets dynamically.

use glam::Vec3;
use crate::api::game::GameConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_MARKERS: usize = 2;
pub const HEADER_MARKER_COUNT: usize = 3;
pub const HEADER_MAX_EVENTS: usize = 4;
pub const HEADER_EVENT_COUNT: usize = 5;
pub const HEADER_PROTOCOL_VERSION: usize = 6;
pub const HEADER_GLOBE_RADIUS: usize = 7;
pub const HEADER_GLOBE_SPIN: usize = 8;
pub const HEADER_EYE_X: usize = 9;
pub const HEADER_EYE_Y: usize = 10;
pub const HEADER_EYE_Z: usize = 11;
pub const HEADER_TARGET_X: usize = 12;
pub const HEADER_TARGET_Y: usize = 13;
pub const HEADER_TARGET_Z: usize = 14;
pub const HEADER_OPEN_REQUESTS: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per marker instance: x, y, z, radius, r, g, b, shininess.
pub const MARKER_FLOATS: usize = 8;

/// Floats per game event: kind, a, b, c (fixed wire format).
pub const EVENT_FLOATS: usize = 4;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_markers: usize,
    pub max_events: usize,

    /// Size of marker data section in floats.
    pub marker_data_floats: usize,
    /// Size of event data section in floats.
    pub event_data_floats: usize,

    /// Offset (in floats) where marker data begins.
    pub marker_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_markers: usize, max_events: usize) -> Self {
        let marker_data_floats = max_markers * MARKER_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let marker_data_offset = HEADER_FLOATS;
        let event_data_offset = marker_data_offset + marker_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_markers,
            max_events,
            marker_data_floats,
            event_data_floats,
            marker_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_markers, config.max_events)
    }
}

/// Per-frame values published in the header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameHeader {
    pub frame: u32,
    pub marker_count: u32,
    pub event_count: u32,
    pub globe_radius: f32,
    pub globe_spin: f32,
    pub eye: Vec3,
    pub target: Vec3,
    pub open_requests: u32,
}

impl FrameHeader {
    /// Fill a header block. The lock slot is left for the host to manage.
    pub fn write_into(&self, layout: &ProtocolLayout, header: &mut [f32; HEADER_FLOATS]) {
        header[HEADER_FRAME_COUNTER] = self.frame as f32;
        header[HEADER_MAX_MARKERS] = layout.max_markers as f32;
        header[HEADER_MARKER_COUNT] = self.marker_count as f32;
        header[HEADER_MAX_EVENTS] = layout.max_events as f32;
        header[HEADER_EVENT_COUNT] = self.event_count as f32;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_GLOBE_RADIUS] = self.globe_radius;
        header[HEADER_GLOBE_SPIN] = self.globe_spin;
        header[HEADER_EYE_X..=HEADER_EYE_Z].copy_from_slice(&self.eye.to_array());
        header[HEADER_TARGET_X..=HEADER_TARGET_Z].copy_from_slice(&self.target.to_array());
        header[HEADER_OPEN_REQUESTS] = self.open_requests as f32;
    }
}
