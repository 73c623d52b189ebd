//! Drag-to-rotate interaction as pure state transitions.
//!
//! Each handler takes the current state by value and returns the next one,
//! plus the rotation to apply to the root. Nothing here touches the scene.

use glam::Vec2;

/// Radians of root rotation per pixel of drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSensitivity {
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for DragSensitivity {
    fn default() -> Self {
        Self { yaw: 0.01, pitch: 0.01 }
    }
}

/// Rotation produced by one pointer move.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationDelta {
    pub yaw: f32,
    pub pitch: f32,
}

/// Pointer interaction state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    pub is_dragging: bool,
    pub last_pointer: Vec2,
    /// Goes false on the first pointer-down and never comes back.
    pub auto_rotate: bool,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            is_dragging: false,
            last_pointer: Vec2::ZERO,
            auto_rotate: true,
        }
    }
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_pointer_down(self, pos: Vec2) -> Self {
        Self {
            is_dragging: true,
            last_pointer: pos,
            auto_rotate: false,
        }
    }

    /// Rotation is reported only while dragging.
    pub fn on_pointer_move(self, pos: Vec2, sensitivity: DragSensitivity) -> (Self, Option<RotationDelta>) {
        if !self.is_dragging {
            return (self, None);
        }
        let delta = pos - self.last_pointer;
        let rotation = RotationDelta {
            yaw: delta.x * sensitivity.yaw,
            pitch: delta.y * sensitivity.pitch,
        };
        (Self { last_pointer: pos, ..self }, Some(rotation))
    }

    pub fn on_pointer_up(self) -> Self {
        Self { is_dragging: false, ..self }
    }

    /// Auto-rotation runs only before the first drag and never during one.
    pub fn should_auto_rotate(&self) -> bool {
        self.auto_rotate && !self.is_dragging
    }
}
