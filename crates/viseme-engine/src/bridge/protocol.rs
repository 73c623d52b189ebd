//! Shared frame buffer layout.
//! Must stay in sync with the page's `protocol.ts`.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 16 floats]
//! [Camera: 20 floats]
//! [Instances: max_instances × 28 floats]
//! [Lights: max_lights × 12 floats]
//! [Events: max_events × 4 floats]
//! ```
//!
//! Capacities are written into the header every frame, so the page can
//! compute offsets without a second channel.

use bytemuck::{cast_slice, Pod};

use crate::api::stage::Stage;
use crate::api::types::StageEvent;
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::MeshInstance;
use crate::renderer::traits::FrameData;
use crate::systems::lighting::Light;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_MAX_LIGHTS: usize = 4;
pub const HEADER_LIGHT_COUNT: usize = 5;
pub const HEADER_MAX_EVENTS: usize = 6;
pub const HEADER_EVENT_COUNT: usize = 7;
pub const HEADER_SURFACE_WIDTH: usize = 8;
pub const HEADER_SURFACE_HEIGHT: usize = 9;
pub const HEADER_BACKGROUND_R: usize = 10;
pub const HEADER_BACKGROUND_G: usize = 11;
pub const HEADER_BACKGROUND_B: usize = 12;
pub const HEADER_PROTOCOL_VERSION: usize = 13;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_lights: usize,
    pub max_events: usize,

    /// Offset (in floats) where the camera uniform begins.
    pub camera_offset: usize,
    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Offset (in floats) where light data begins.
    pub light_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_lights: usize, max_events: usize) -> Self {
        let camera_offset = HEADER_FLOATS;
        let instance_data_offset = camera_offset + CameraUniform::FLOATS;
        let light_data_offset = instance_data_offset + max_instances * MeshInstance::FLOATS;
        let event_data_offset = light_data_offset + max_lights * Light::FLOATS;
        let buffer_total_floats = event_data_offset + max_events * StageEvent::FLOATS;

        Self {
            max_instances,
            max_lights,
            max_events,
            camera_offset,
            instance_data_offset,
            light_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Layout sized exactly for a stage's model, rig and event capacity.
    pub fn for_stage(stage: &Stage) -> Self {
        Self::new(
            stage.model().scene().mesh_count(),
            stage.lights().count(),
            stage.config().max_events,
        )
    }

    /// Write one frame into `out`, which must hold `buffer_total_floats`.
    /// Sections are clipped to their capacity. Returns false if `out` is too small.
    pub fn pack(&self, frame: &FrameData, frame_counter: u64, out: &mut [f32]) -> bool {
        if out.len() < self.buffer_total_floats {
            log::warn!(
                "frame buffer too small: {} < {}",
                out.len(),
                self.buffer_total_floats
            );
            return false;
        }

        let instances = &frame.instances[..frame.instances.len().min(self.max_instances)];
        let lights = &frame.lights[..frame.lights.len().min(self.max_lights)];
        let events = &frame.events[..frame.events.len().min(self.max_events)];

        let header = &mut out[..HEADER_FLOATS];
        header.fill(0.0);
        header[HEADER_FRAME_COUNTER] = frame_counter as f32;
        header[HEADER_MAX_INSTANCES] = self.max_instances as f32;
        header[HEADER_INSTANCE_COUNT] = instances.len() as f32;
        header[HEADER_MAX_LIGHTS] = self.max_lights as f32;
        header[HEADER_LIGHT_COUNT] = lights.len() as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_EVENT_COUNT] = events.len() as f32;
        header[HEADER_SURFACE_WIDTH] = frame.surface_width as f32;
        header[HEADER_SURFACE_HEIGHT] = frame.surface_height as f32;
        header[HEADER_BACKGROUND_R] = frame.background[0];
        header[HEADER_BACKGROUND_G] = frame.background[1];
        header[HEADER_BACKGROUND_B] = frame.background[2];
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;

        copy_section(out, self.camera_offset, std::slice::from_ref(&frame.camera));
        copy_section(out, self.instance_data_offset, instances);
        copy_section(out, self.light_data_offset, lights);
        copy_section(out, self.event_data_offset, events);
        true
    }
}

fn copy_section<T: Pod>(out: &mut [f32], offset: usize, items: &[T]) {
    let floats: &[f32] = cast_slice(items);
    out[offset..offset + floats.len()].copy_from_slice(floats);
}
