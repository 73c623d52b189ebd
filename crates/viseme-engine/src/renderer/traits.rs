//! Renderer contract.
//!
//! The stage produces a `FrameData` every frame and hands it to a `Renderer`.
//! In the browser the renderer packs the frame into a shared buffer that the
//! page's WebGL code draws from; tests use recording renderers.

use super::camera::CameraUniform;
use super::instance::MeshInstance;
use crate::api::types::StageEvent;
use crate::systems::lighting::Light;

/// Timing information from a draw call.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawTiming {
    /// Time spent submitting draw calls (microseconds)
    pub draw_us: u32,
}

/// Renderer backends.
///
/// ```ignore
/// struct CountingRenderer(usize);
///
/// impl Renderer for CountingRenderer {
///     fn backend(&self) -> &'static str { "counting" }
///     fn draw(&mut self, frame: &FrameData) -> DrawTiming {
///         self.0 = frame.instances.len();
///         DrawTiming::default()
///     }
/// }
/// ```
pub trait Renderer {
    /// Backend identifier (e.g., "shared-buffer", "webgl")
    fn backend(&self) -> &'static str;

    /// Draw a complete frame.
    fn draw(&mut self, frame: &FrameData) -> DrawTiming;

    /// Surface size changed. Default: nothing to rebuild.
    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// Complete frame data for rendering.
pub struct FrameData<'a> {
    /// One instance per mesh part, world matrices already propagated.
    pub instances: &'a [MeshInstance],
    pub lights: &'a [Light],
    pub camera: CameraUniform,
    /// Clear color RGB.
    pub background: [f32; 3],
    pub surface_width: u32,
    pub surface_height: u32,
    /// Events raised since the previous frame.
    pub events: &'a [StageEvent],
}
