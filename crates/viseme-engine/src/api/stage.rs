use serde::{Deserialize, Serialize};

use crate::api::types::{event_kind, Generation, StageEvent};
use crate::components::mesh::Color;
use crate::components::pose::{ArticulatedPose, RootOrientation};
use crate::core::time::FrameClock;
use crate::input::interaction::{DragSensitivity, InteractionState};
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::camera::Camera3D;
use crate::renderer::instance::MeshBuffer;
use crate::renderer::traits::{DrawTiming, FrameData, Renderer};
use crate::systems::articulation::ArticulationEngine;
use crate::systems::geometry::{build_mouth, MouthModel};
use crate::systems::lighting::LightRig;
use crate::systems::render::{auto_rotate, build_mesh_buffer};

/// Configuration for the stage. Every field has a default, so a partial
/// JSON object (or `{}`) is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Fixed frame duration in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Logical surface size in pixels, independent of the container.
    pub surface_width: u32,
    pub surface_height: u32,
    /// Length of one articulation run in seconds (default: 1.5).
    pub articulation_duration: f32,
    /// Yaw added per frame while auto-rotating, radians.
    pub auto_rotate_speed: f32,
    /// Radians of rotation per pixel of drag.
    pub yaw_sensitivity: f32,
    pub pitch_sensitivity: f32,
    /// Rate handed to speech synthesis.
    pub speech_rate: f32,
    /// Language tag handed to speech recognition.
    pub speech_lang: String,
    /// Clear color as 0xRRGGBB.
    pub background: u32,
    /// Maximum stage events per frame (default: 32).
    pub max_events: usize,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            surface_width: 600,
            surface_height: 700,
            articulation_duration: 1.5,
            auto_rotate_speed: 0.002,
            yaw_sensitivity: 0.01,
            pitch_sensitivity: 0.01,
            speech_rate: 0.8,
            speech_lang: "en-US".to_string(),
            background: 0x0a0a0f,
            max_events: 32,
        }
    }
}

impl StageConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn drag_sensitivity(&self) -> DragSensitivity {
        DragSensitivity {
            yaw: self.yaw_sensitivity,
            pitch: self.pitch_sensitivity,
        }
    }

    pub fn background_color(&self) -> Color {
        Color::from_hex(self.background)
    }
}

/// The articulation stage: mouth model, live transforms, and the frame loop.
///
/// Root rotation and the articulated pose are separate fields with separate
/// writers. Pointer input and auto-rotation write `orientation`; the
/// articulation engine writes `pose`. Rendering reads both every frame.
pub struct Stage {
    config: StageConfig,
    model: MouthModel,
    rest: ArticulatedPose,
    orientation: RootOrientation,
    interaction: InteractionState,
    pose: ArticulatedPose,
    articulation: ArticulationEngine,
    lights: LightRig,
    camera: Camera3D,
    clock: FrameClock,
    input: InputQueue,
    /// Events visible to the current frame.
    events: Vec<StageEvent>,
    /// Events raised between ticks, published by the next tick.
    pending: Vec<StageEvent>,
    meshes: MeshBuffer,
}

impl Stage {
    pub fn new(config: StageConfig) -> Self {
        let model = build_mouth();
        let rest = model.rest_pose();
        let camera = Camera3D::for_surface(config.surface_width, config.surface_height);
        let meshes = MeshBuffer::with_capacity(model.scene().mesh_count());
        log::info!(
            "stage built: {} parts, {} meshes",
            model.scene().len(),
            model.scene().mesh_count()
        );

        Self {
            clock: FrameClock::new(config.fixed_dt),
            articulation: ArticulationEngine::new(config.articulation_duration),
            events: Vec::with_capacity(config.max_events),
            pending: Vec::with_capacity(config.max_events),
            lights: LightRig::studio(),
            orientation: RootOrientation::default(),
            interaction: InteractionState::new(),
            input: InputQueue::new(),
            pose: rest,
            rest,
            model,
            camera,
            meshes,
            config,
        }
    }

    /// Queue an input event for the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Apply one input event now.
    pub fn handle_input(&mut self, event: InputEvent) {
        let pos = event.pointer();
        match event {
            InputEvent::PointerDown { .. } => {
                let was_auto = self.interaction.auto_rotate;
                self.interaction = self.interaction.on_pointer_down(pos);
                if was_auto {
                    log::info!("auto-rotate disabled by first drag");
                    self.emit(StageEvent::new(event_kind::AUTO_ROTATE_DISABLED, 0.0, 0.0, 0.0));
                }
            }
            InputEvent::PointerMove { .. } => {
                let (next, delta) = self
                    .interaction
                    .on_pointer_move(pos, self.config.drag_sensitivity());
                self.interaction = next;
                if let Some(delta) = delta {
                    self.orientation.rotate(delta.yaw, delta.pitch);
                }
            }
            InputEvent::PointerUp { .. } => {
                self.interaction = self.interaction.on_pointer_up();
            }
        }
    }

    /// Start articulating `word`, replacing any run in progress.
    pub fn animate_word(&mut self, word: &str) -> Generation {
        let generation = self
            .articulation
            .animate_word(word, &self.rest, &mut self.pose);
        let code = self.articulation.profile().map_or(0.0, |p| p.code() as f32);
        self.emit(StageEvent::new(
            event_kind::ARTICULATION_STARTED,
            generation.0 as f32,
            code,
            0.0,
        ));
        generation
    }

    /// Advance by `elapsed` seconds of real time. Returns frames run.
    ///
    /// Articulation sees the full `elapsed`, so a run lasts its duration in
    /// real time. Auto-rotation runs per fixed frame and is capped.
    pub fn tick(&mut self, elapsed: f32) -> u32 {
        self.events.clear();
        self.events.append(&mut self.pending);

        for event in self.input.drain() {
            self.handle_input(event);
        }

        self.articulate(elapsed);

        let frames = self.clock.advance(elapsed);
        for _ in 0..frames {
            auto_rotate(&mut self.orientation, &self.interaction, self.config.auto_rotate_speed);
        }
        self.events.append(&mut self.pending);
        if self.events.len() > self.config.max_events {
            log::warn!("dropping {} stage events", self.events.len() - self.config.max_events);
            self.events.truncate(self.config.max_events);
        }
        frames
    }

    fn articulate(&mut self, elapsed: f32) {
        if let Some(done) = self.articulation.update(elapsed, &self.rest, &mut self.pose) {
            self.emit(StageEvent::new(
                event_kind::ARTICULATION_FINISHED,
                done.generation.0 as f32,
                done.profile.code() as f32,
                0.0,
            ));
        }
    }

    /// Build this frame's instances from live state and draw them.
    pub fn render(&mut self, renderer: &mut impl Renderer) -> DrawTiming {
        build_mesh_buffer(&self.model, self.orientation, &self.pose, &mut self.meshes);
        let frame = FrameData {
            instances: &self.meshes.instances,
            lights: self.lights.as_slice(),
            camera: self.camera.uniform(),
            background: self.config.background_color().to_array(),
            surface_width: self.config.surface_width,
            surface_height: self.config.surface_height,
            events: &self.events,
        };
        renderer.draw(&frame)
    }

    fn emit(&mut self, event: StageEvent) {
        if self.pending.len() >= self.config.max_events {
            log::warn!("stage event queue full, dropping kind {}", event.kind);
            return;
        }
        self.pending.push(event);
    }

    // ---- Accessors ----

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn model(&self) -> &MouthModel {
        &self.model
    }

    pub fn orientation(&self) -> RootOrientation {
        self.orientation
    }

    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    pub fn pose(&self) -> &ArticulatedPose {
        &self.pose
    }

    pub fn rest_pose(&self) -> &ArticulatedPose {
        &self.rest
    }

    pub fn articulation(&self) -> &ArticulationEngine {
        &self.articulation
    }

    pub fn lights(&self) -> &LightRig {
        &self.lights
    }

    pub fn camera(&self) -> &Camera3D {
        &self.camera
    }

    pub fn events(&self) -> &[StageEvent] {
        &self.events
    }

    pub fn meshes(&self) -> &MeshBuffer {
        &self.meshes
    }

    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new(StageConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::camera::CameraUniform;
    use crate::systems::articulation::ArticulationProfile;

    /// Binary-exact frame length so elapsed time sums without drift.
    const QUARTER: f32 = 0.25;

    fn quarter_stage() -> Stage {
        Stage::new(StageConfig {
            fixed_dt: QUARTER,
            ..StageConfig::default()
        })
    }

    #[derive(Default)]
    struct RecordingRenderer {
        frames: usize,
        instances: usize,
        lights: usize,
        events: Vec<StageEvent>,
        camera: Option<CameraUniform>,
    }

    impl Renderer for RecordingRenderer {
        fn backend(&self) -> &'static str {
            "recording"
        }

        fn draw(&mut self, frame: &FrameData) -> DrawTiming {
            self.frames += 1;
            self.instances = frame.instances.len();
            self.lights = frame.lights.len();
            self.events = frame.events.to_vec();
            self.camera = Some(frame.camera);
            DrawTiming::default()
        }
    }

    #[test]
    fn config_defaults() {
        let c = StageConfig::default();
        assert!((c.fixed_dt - 1.0 / 60.0).abs() < 1e-9);
        assert_eq!((c.surface_width, c.surface_height), (600, 700));
        assert_eq!(c.articulation_duration, 1.5);
        assert_eq!(c.auto_rotate_speed, 0.002);
        assert_eq!(c.speech_rate, 0.8);
        assert_eq!(c.speech_lang, "en-US");
        assert_eq!(c.background, 0x0a0a0f);
    }

    #[test]
    fn config_from_partial_json() {
        let c = StageConfig::from_json(r#"{ "speech_rate": 1.0, "surface_width": 300 }"#).unwrap();
        assert_eq!(c.speech_rate, 1.0);
        assert_eq!(c.surface_width, 300);
        assert_eq!(c.surface_height, 700);
        assert_eq!(StageConfig::from_json("{}").unwrap(), StageConfig::default());
        assert!(StageConfig::from_json("not json").is_err());
    }

    #[test]
    fn auto_rotates_per_frame_until_drag() {
        let mut stage = quarter_stage();
        assert_eq!(stage.tick(1.0), 4);
        assert!((stage.orientation().yaw - 0.008).abs() < 1e-6);

        stage.push_input(InputEvent::PointerDown { x: 100.0, y: 100.0 });
        stage.tick(QUARTER);
        let yaw = stage.orientation().yaw;
        assert!(stage.events().iter().any(|e| e.kind == event_kind::AUTO_ROTATE_DISABLED));

        stage.push_input(InputEvent::PointerUp { x: 100.0, y: 100.0 });
        stage.tick(1.0);
        assert_eq!(stage.orientation().yaw, yaw);
        assert!(stage.events().is_empty());
    }

    #[test]
    fn auto_rotate_disabled_reported_once() {
        let mut stage = quarter_stage();
        for _ in 0..3 {
            stage.handle_input(InputEvent::PointerDown { x: 0.0, y: 0.0 });
            stage.handle_input(InputEvent::PointerUp { x: 0.0, y: 0.0 });
        }
        stage.tick(QUARTER);
        let count = stage
            .events()
            .iter()
            .filter(|e| e.kind == event_kind::AUTO_ROTATE_DISABLED)
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn drag_rotates_root_only() {
        let mut stage = quarter_stage();
        stage.handle_input(InputEvent::PointerDown { x: 100.0, y: 100.0 });
        stage.handle_input(InputEvent::PointerMove { x: 150.0, y: 80.0 });

        let o = stage.orientation();
        assert!((o.yaw - 0.5).abs() < 1e-6);
        assert!((o.pitch - (-0.2)).abs() < 1e-6);
        assert_eq!(stage.pose(), stage.rest_pose());
    }

    #[test]
    fn move_without_press_does_nothing() {
        let mut stage = quarter_stage();
        stage.handle_input(InputEvent::PointerMove { x: 150.0, y: 80.0 });
        assert_eq!(stage.orientation(), RootOrientation::default());
        assert!(stage.interaction().auto_rotate);
    }

    #[test]
    fn articulation_leaves_rotation_alone() {
        let mut stage = quarter_stage();
        stage.handle_input(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        stage.handle_input(InputEvent::PointerMove { x: 30.0, y: 10.0 });
        let before = stage.orientation();

        stage.animate_word("Hello");
        stage.tick(1.0);
        assert_eq!(stage.orientation(), before);
    }

    #[test]
    fn please_end_to_end() {
        let mut stage = Stage::new(StageConfig {
            fixed_dt: 0.125,
            ..StageConfig::default()
        });
        let rest = *stage.rest_pose();

        let generation = stage.animate_word("Please");
        assert_eq!(stage.pose().upper_lip.offset, rest.upper_lip.offset);
        assert_eq!(stage.pose().lower_lip.offset, rest.lower_lip.offset);

        // Progress 0.25 is 0.375 s into the 1.5 s run.
        assert_eq!(stage.tick(0.375), 3);
        assert_eq!(stage.articulation().progress(), Some(0.25));
        let upper = stage.pose().upper_lip.offset.y;
        assert!((upper - (rest.upper_lip.offset.y - 0.06)).abs() < 1e-5, "upper lip at {}", upper);

        // Finishes at 1.5 s, reported in that frame's events.
        assert_eq!(stage.tick(1.125), 9);
        assert!(!stage.articulation().is_running());
        let finished = stage
            .events()
            .iter()
            .find(|e| e.kind == event_kind::ARTICULATION_FINISHED)
            .copied();
        assert_eq!(
            finished,
            Some(StageEvent::new(
                event_kind::ARTICULATION_FINISHED,
                generation.0 as f32,
                ArticulationProfile::Please.code() as f32,
                0.0,
            ))
        );
    }

    #[test]
    fn long_frame_still_finishes_articulation() {
        let mut stage = Stage::default();
        stage.animate_word("Please");

        // Auto-rotation is capped at 10 frames; articulation sees all 1.5 s.
        assert_eq!(stage.tick(1.5), 10);
        assert!(!stage.articulation().is_running());
        assert!(stage
            .events()
            .iter()
            .any(|e| e.kind == event_kind::ARTICULATION_FINISHED));
        assert!((stage.orientation().yaw - 0.02).abs() < 1e-6);
    }

    #[test]
    fn run_lasts_ninety_frames_at_sixty_hertz() {
        let mut stage = Stage::default();
        stage.animate_word("Hello");

        let mut ticks = 0;
        while stage.articulation().is_running() && ticks < 200 {
            stage.tick(1.0 / 60.0);
            ticks += 1;
        }
        assert_eq!(ticks, 90);
    }

    #[test]
    fn started_event_published_on_next_tick() {
        let mut stage = quarter_stage();
        stage.animate_word("Smile");
        assert!(stage.events().is_empty());

        stage.tick(0.0);
        assert_eq!(stage.events().len(), 1);
        assert_eq!(stage.events()[0].kind, event_kind::ARTICULATION_STARTED);
        assert_eq!(stage.events()[0].b, ArticulationProfile::Smile.code() as f32);

        stage.tick(0.0);
        assert!(stage.events().is_empty());
    }

    #[test]
    fn new_word_replaces_running_one() {
        let mut stage = quarter_stage();
        stage.animate_word("Hello");
        stage.tick(0.5);
        let second = stage.animate_word("Thank You");

        stage.tick(1.5);
        let finished: Vec<_> = stage
            .events()
            .iter()
            .filter(|e| e.kind == event_kind::ARTICULATION_FINISHED)
            .collect();
        assert_eq!(finished.len(), 1);
        assert_eq!(finished[0].a, second.0 as f32);
        assert_eq!(stage.articulation().profile(), None);
    }

    #[test]
    fn event_queue_is_capped() {
        let mut stage = Stage::new(StageConfig {
            max_events: 2,
            fixed_dt: QUARTER,
            ..StageConfig::default()
        });
        for _ in 0..5 {
            stage.animate_word("Hello");
        }
        stage.tick(0.0);
        assert_eq!(stage.events().len(), 2);
    }

    #[test]
    fn render_reads_live_pose() {
        let mut stage = quarter_stage();
        let lower = stage.model().handles().lower_lip;
        let mut renderer = RecordingRenderer::default();

        stage.render(&mut renderer);
        let rest_y = stage.meshes().get(lower).unwrap().world().w_axis.y;

        stage.animate_word("Hello");
        stage.tick(0.5);
        stage.render(&mut renderer);
        let live_y = stage.meshes().get(lower).unwrap().world().w_axis.y;

        assert!((live_y - stage.pose().lower_lip.offset.y).abs() < 1e-5);
        assert!(live_y < rest_y);
        assert_eq!(renderer.frames, 2);
        assert_eq!(renderer.instances, stage.model().scene().mesh_count());
        assert_eq!(renderer.lights, 4);
        assert!(renderer.camera.is_some());
        assert_eq!(renderer.events.len(), 1);
    }
}
