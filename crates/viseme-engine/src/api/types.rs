use bytemuck::{Pod, Zeroable};

/// Unique identifier for a node (mesh or group) in the mouth model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartId(pub u32);

/// Identifies one articulation run. Every `animate_word` call takes the next value,
/// so a larger generation always supersedes a smaller one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

/// A stage event communicated from Rust to the page via the frame buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct StageEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl StageEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}

/// Stage event kinds, mirrored by the page.
pub mod event_kind {
    /// a = generation, b = profile code.
    pub const ARTICULATION_STARTED: f32 = 1.0;
    /// a = generation, b = profile code.
    pub const ARTICULATION_FINISHED: f32 = 2.0;
    /// Emitted once, on the first pointer-down.
    pub const AUTO_ROTATE_DISABLED: f32 = 3.0;
}
