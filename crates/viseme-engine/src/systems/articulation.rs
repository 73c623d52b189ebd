//! Articulation engine: per-word viseme animation over a fixed window.
//!
//! Idle → Running(progress) → Idle. Each step rebuilds the pose from rest plus
//! the profile sampled at the current progress, so steps never accumulate.
//! A new `animate_word` call replaces the running one (cancel-and-replace),
//! and the replaced run is dropped without a finish report. Generations
//! identify runs in stage events.

use crate::api::types::Generation;
use crate::components::pose::ArticulatedPose;
use crate::extensions::wave::Wave;

/// Default run length in seconds (1500 ms).
pub const DEFAULT_DURATION: f32 = 1.5;

/// Slack when deciding a run has reached its duration, in seconds.
const FINISH_TOLERANCE: f64 = 1e-6;

/// Articulation shape for one target word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticulationProfile {
    /// Mouth opens wide on "He-llo"; the tongue flattens.
    Hello,
    /// Lips pull back with little vertical travel.
    Smile,
    /// "Th": tongue pushes forward between the teeth.
    ThankYou,
    /// "P": lips press together, then release.
    Please,
    /// Generic open-close for any other word.
    Natural,
}

/// Gains applied to the profile's wave.
#[derive(Debug, Clone, Copy)]
struct ProfileShape {
    wave: Wave,
    upper_lip_y: f32,
    lower_lip_y: f32,
    /// Absolute cavity Y scale as `base + gain · amount`.
    cavity_scale_y: Option<(f32, f32)>,
    tongue_z: f32,
    /// Tongue Z scale as `max(0, 1 − squash · amount)`.
    tongue_squash_z: Option<f32>,
}

impl ArticulationProfile {
    pub const ALL: [ArticulationProfile; 5] = [
        ArticulationProfile::Hello,
        ArticulationProfile::Smile,
        ArticulationProfile::ThankYou,
        ArticulationProfile::Please,
        ArticulationProfile::Natural,
    ];

    /// Look up the profile for a word. Unknown words get `Natural`.
    pub fn for_word(word: &str) -> Self {
        let word = word.trim();
        if word.eq_ignore_ascii_case("hello") {
            ArticulationProfile::Hello
        } else if word.eq_ignore_ascii_case("smile") {
            ArticulationProfile::Smile
        } else if word.eq_ignore_ascii_case("thank you") {
            ArticulationProfile::ThankYou
        } else if word.eq_ignore_ascii_case("please") {
            ArticulationProfile::Please
        } else {
            ArticulationProfile::Natural
        }
    }

    /// Numeric code carried in stage events.
    pub fn code(self) -> u32 {
        match self {
            ArticulationProfile::Hello => 0,
            ArticulationProfile::Smile => 1,
            ArticulationProfile::ThankYou => 2,
            ArticulationProfile::Please => 3,
            ArticulationProfile::Natural => 4,
        }
    }

    pub fn wave(self) -> Wave {
        self.shape().wave
    }

    fn shape(self) -> ProfileShape {
        match self {
            ArticulationProfile::Hello => ProfileShape {
                wave: Wave::new(1.5, 0.6),
                upper_lip_y: 0.15,
                lower_lip_y: -0.2,
                cavity_scale_y: Some((1.0, 0.4)),
                tongue_z: 0.0,
                tongue_squash_z: Some(0.3),
            },
            ArticulationProfile::Smile => ProfileShape {
                wave: Wave::new(1.0, 0.5),
                upper_lip_y: 0.1,
                lower_lip_y: -0.1,
                cavity_scale_y: Some((0.7, 0.3)),
                tongue_z: 0.0,
                tongue_squash_z: None,
            },
            ArticulationProfile::ThankYou => ProfileShape {
                wave: Wave::new(1.0, 0.8),
                upper_lip_y: 0.15,
                lower_lip_y: -0.15,
                cavity_scale_y: None,
                tongue_z: 0.3,
                tongue_squash_z: None,
            },
            ArticulationProfile::Please => ProfileShape {
                wave: Wave::new(2.0, 0.3),
                upper_lip_y: -0.2,
                lower_lip_y: 0.2,
                cavity_scale_y: Some((0.5, 0.2)),
                tongue_z: 0.0,
                tongue_squash_z: None,
            },
            ArticulationProfile::Natural => ProfileShape {
                wave: Wave::new(1.0, 0.5),
                upper_lip_y: 0.1,
                lower_lip_y: -0.15,
                cavity_scale_y: Some((1.0, 0.3)),
                tongue_z: 0.0,
                tongue_squash_z: None,
            },
        }
    }

    /// Pose at `progress` in [0, 1], computed from `rest` alone.
    pub fn evaluate(self, progress: f32, rest: &ArticulatedPose) -> ArticulatedPose {
        let shape = self.shape();
        let amount = shape.wave.sample(progress);
        let mut pose = *rest;

        pose.upper_lip.offset.y = rest.upper_lip.offset.y + shape.upper_lip_y * amount;
        pose.lower_lip.offset.y = rest.lower_lip.offset.y + shape.lower_lip_y * amount;
        if let Some((base, gain)) = shape.cavity_scale_y {
            pose.cavity.scale.y = base + gain * amount;
        }
        pose.tongue.offset.z = rest.tongue.offset.z + shape.tongue_z * amount;
        if let Some(squash) = shape.tongue_squash_z {
            pose.tongue.scale.z = (1.0 - squash * amount).max(0.0);
        }
        pose
    }
}

/// Observable engine state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArticulationPhase {
    Idle,
    Running { progress: f32 },
}

#[derive(Debug, Clone)]
struct Run {
    generation: Generation,
    profile: ArticulationProfile,
    word: String,
    /// Real seconds since the run started.
    elapsed: f64,
}

/// A finished run, reported once by `update`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Finished {
    pub generation: Generation,
    pub profile: ArticulationProfile,
}

/// Single-flight articulation driver. Ticked by the stage once per tick
/// with the real elapsed time, uncapped.
#[derive(Debug)]
pub struct ArticulationEngine {
    duration: f32,
    /// Latest issued generation, carried by the current run.
    generation: Generation,
    run: Option<Run>,
}

impl ArticulationEngine {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            generation: Generation::default(),
            run: None,
        }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Start animating `word`, replacing any run in progress.
    /// Writes the progress-0 pose immediately.
    pub fn animate_word(
        &mut self,
        word: &str,
        rest: &ArticulatedPose,
        pose: &mut ArticulatedPose,
    ) -> Generation {
        self.generation = self.generation.next();
        let profile = ArticulationProfile::for_word(word);

        if let Some(old) = &self.run {
            log::debug!(
                "articulation {:?} ({}) superseded by {:?}",
                old.generation,
                old.word,
                self.generation
            );
        }
        log::info!("articulating '{}' with {:?} profile", word, profile);

        self.run = Some(Run {
            generation: self.generation,
            profile,
            word: word.to_string(),
            elapsed: 0.0,
        });
        *pose = profile.evaluate(0.0, rest);
        self.generation
    }

    /// Advance the current run by `dt` seconds and write its pose.
    /// Returns the run's identity on the step that reaches progress 1.
    pub fn update(
        &mut self,
        dt: f32,
        rest: &ArticulatedPose,
        pose: &mut ArticulatedPose,
    ) -> Option<Finished> {
        let run = self.run.as_mut()?;

        run.elapsed += f64::from(dt.max(0.0));
        let progress = progress_of(run.elapsed, self.duration);
        *pose = run.profile.evaluate(progress, rest);

        if progress < 1.0 {
            return None;
        }

        let finished = Finished {
            generation: run.generation,
            profile: run.profile,
        };
        log::debug!("articulation {:?} ({}) finished", run.generation, run.word);
        self.run = None;
        Some(finished)
    }

    pub fn phase(&self) -> ArticulationPhase {
        match &self.run {
            Some(run) => ArticulationPhase::Running {
                progress: progress_of(run.elapsed, self.duration),
            },
            None => ArticulationPhase::Idle,
        }
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Progress of the current run, or `None` when idle.
    pub fn progress(&self) -> Option<f32> {
        match self.phase() {
            ArticulationPhase::Running { progress } => Some(progress),
            ArticulationPhase::Idle => None,
        }
    }

    /// The profile being played, if any.
    pub fn profile(&self) -> Option<ArticulationProfile> {
        self.run.as_ref().map(|r| r.profile)
    }

    /// Latest generation handed out (zero before the first run).
    pub fn generation(&self) -> Generation {
        self.generation
    }
}

impl Default for ArticulationEngine {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}

fn progress_of(elapsed: f64, duration: f32) -> f32 {
    let duration = f64::from(duration);
    if duration <= 0.0 || elapsed >= duration - FINISH_TOLERANCE {
        1.0
    } else {
        (elapsed / duration).clamp(0.0, 1.0) as f32
    }
}
