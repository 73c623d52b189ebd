use viseme_engine::{
    DrawTiming, FrameData, Lesson, ProtocolLayout, RenderSurface, Renderer, Rng, Stage,
    StageConfig, SpeechSynthesizer, SurfaceError, SurfaceHost, InputEvent, WordDeck,
};

/// Packs each frame into a flat `f32` buffer the page reads through
/// exported pointers.
pub struct BufferRenderer {
    layout: ProtocolLayout,
    buffer: Vec<f32>,
    frame_counter: u64,
}

impl BufferRenderer {
    pub fn new(layout: ProtocolLayout) -> Self {
        Self {
            buffer: vec![0.0; layout.buffer_total_floats],
            layout,
            frame_counter: 0,
        }
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    pub fn buffer(&self) -> &[f32] {
        &self.buffer
    }

    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }
}

impl Renderer for BufferRenderer {
    fn backend(&self) -> &'static str {
        "shared-buffer"
    }

    fn draw(&mut self, frame: &FrameData) -> DrawTiming {
        self.frame_counter += 1;
        self.layout.pack(frame, self.frame_counter, &mut self.buffer);
        DrawTiming::default()
    }
}

/// Wires the stage, the lesson and the render surface together.
///
/// The page keeps one runner in a `thread_local!` and drives it through
/// free `#[wasm_bindgen]` functions, since wasm-bindgen cannot export
/// generic structs directly.
pub struct StageRunner<H: SurfaceHost, S: SpeechSynthesizer> {
    stage: Stage,
    lesson: Lesson,
    surface: RenderSurface<H>,
    speech: S,
    renderer: BufferRenderer,
}

impl<H: SurfaceHost, S: SpeechSynthesizer> StageRunner<H, S> {
    pub fn new(config: StageConfig, host: H, speech: S, rng: Rng) -> Self {
        let surface = RenderSurface::new(host, config.surface_width, config.surface_height);
        let lesson = Lesson::new(WordDeck::new(rng), config.speech_rate);
        let stage = Stage::new(config);
        let renderer = BufferRenderer::new(ProtocolLayout::for_stage(&stage));

        Self {
            stage,
            lesson,
            surface,
            speech,
            renderer,
        }
    }

    /// Attach the render surface. Mounting twice keeps the first surface.
    pub fn mount(&mut self) -> Result<(), SurfaceError> {
        self.surface.mount().map(|_| ())
    }

    /// Detach the render surface. Safe to call repeatedly.
    pub fn unmount(&mut self) {
        self.surface.teardown();
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.stage.push_input(event);
    }

    /// Run one animation frame: advance the stage, then draw if mounted.
    pub fn tick(&mut self, dt: f32) {
        self.stage.tick(dt);
        if self.surface.is_mounted() {
            self.stage.render(&mut self.renderer);
        }
    }

    pub fn play_word(&mut self) {
        self.lesson.play_word(&mut self.stage, &mut self.speech);
    }

    pub fn next_word(&mut self) -> String {
        self.lesson.next_word().to_string()
    }

    pub fn start_listening(&mut self) -> bool {
        self.lesson.start_listening()
    }

    pub fn submit_transcript(&mut self, transcript: &str) {
        self.lesson.receive_transcript(transcript);
    }

    pub fn listening_failed(&mut self, reason: &str) {
        self.lesson.listening_failed(reason);
    }

    // ---- Accessors ----

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    pub fn surface(&self) -> &RenderSurface<H> {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut RenderSurface<H> {
        &mut self.surface
    }

    pub fn renderer(&self) -> &BufferRenderer {
        &self.renderer
    }

    /// Raw pointer to the frame buffer for shared-memory reads.
    pub fn frame_ptr(&self) -> *const f32 {
        self.renderer.buffer.as_ptr()
    }

    pub fn frame_len(&self) -> u32 {
        self.renderer.buffer.len() as u32
    }
}
