//! Runtime transform state, split by writer.
//!
//! `RootOrientation` is written only by pointer interaction and auto-rotation.
//! `ArticulatedPose` is written only by the articulation engine.
//! Neither type can reach the other's fields, so the two writers never overlap.

use glam::{EulerRot, Quat, Vec3};
use crate::extensions::transform::LocalTransform;

/// Rotation of the scene root. Unbounded in both axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RootOrientation {
    /// Rotation about X, radians.
    pub pitch: f32,
    /// Rotation about Y, radians.
    pub yaw: f32,
}

impl RootOrientation {
    pub fn rotate(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw += d_yaw;
        self.pitch += d_pitch;
    }

    /// Euler XYZ, matching the order the page renderer uses for groups.
    pub fn to_quat(self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.pitch, self.yaw, 0.0)
    }
}

/// Current local transforms of the animated subset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArticulatedPose {
    pub upper_lip: LocalTransform,
    pub lower_lip: LocalTransform,
    pub cavity: LocalTransform,
    /// Applies to the tongue group, so body, tip and ridges move together.
    pub tongue: LocalTransform,
}

impl ArticulatedPose {
    /// Largest per-component distance between two poses.
    pub fn max_deviation(&self, other: &ArticulatedPose) -> f32 {
        let pairs = [
            (self.upper_lip, other.upper_lip),
            (self.lower_lip, other.lower_lip),
            (self.cavity, other.cavity),
            (self.tongue, other.tongue),
        ];
        pairs
            .iter()
            .map(|(a, b)| {
                let d_offset: Vec3 = (a.offset - b.offset).abs();
                let d_scale: Vec3 = (a.scale - b.scale).abs();
                d_offset.max_element().max(d_scale.max_element())
            })
            .fold(0.0, f32::max)
    }
}
