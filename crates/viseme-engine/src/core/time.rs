/// Fixed-step frame clock.
///
/// Converts variable browser frame deltas into whole frames of `dt` seconds.
/// Per-frame constants (auto-rotation speed) advance in these frames, so they
/// behave the same on any display rate. Articulation is timed by the raw
/// elapsed time instead.
pub struct FrameClock {
    /// Duration of one frame.
    dt: f32,
    /// Time carried over from previous deltas.
    accumulator: f32,
    /// Most frames a single delta may produce.
    max_frames: u32,
    /// Frames produced since construction.
    frames: u64,
}

impl FrameClock {
    pub const DEFAULT_MAX_FRAMES: u32 = 10;

    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_frames: Self::DEFAULT_MAX_FRAMES,
            frames: 0,
        }
    }

    /// Cap the frames one delta can produce (at least 1).
    pub fn with_max_frames(mut self, max_frames: u32) -> Self {
        self.max_frames = max_frames.max(1);
        self
    }

    /// Add elapsed real time. Returns the number of frames to run.
    /// Time beyond the cap is dropped, so a backgrounded tab does not replay.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        if self.dt <= 0.0 {
            return 0;
        }
        self.accumulator += elapsed.max(0.0);
        let mut frames = (self.accumulator / self.dt) as u32;
        if frames > self.max_frames {
            frames = self.max_frames;
            self.accumulator = 0.0;
        } else {
            self.accumulator -= frames as f32 * self.dt;
        }
        self.frames += frames as u64;
        frames
    }

    /// Interpolation alpha between frames (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        if self.dt <= 0.0 {
            0.0
        } else {
            self.accumulator / self.dt
        }
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Total frames produced so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
