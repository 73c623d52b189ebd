// extensions/wave.rs
//
// Sine oscillation over normalized progress: the easing shape every
// articulation profile is built from. Pure math, no scene access.

use std::f32::consts::PI;

/// `sin(progress · π · half_turns) · amplitude`.
///
/// `half_turns = 1` rises and falls back once over the run;
/// `half_turns = 2` completes a full period and ends at zero;
/// `half_turns = 1.5` ends at the negative extreme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    pub half_turns: f32,
    pub amplitude: f32,
}

impl Wave {
    pub const fn new(half_turns: f32, amplitude: f32) -> Self {
        Self { half_turns, amplitude }
    }

    /// Sample the wave at `progress`, clamped to [0, 1].
    #[inline]
    pub fn sample(self, progress: f32) -> f32 {
        let t = progress.clamp(0.0, 1.0);
        (t * PI * self.half_turns).sin() * self.amplitude
    }
}
