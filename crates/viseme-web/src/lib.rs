pub mod runner;
pub mod speech;
pub mod surface;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use viseme_engine::{InputEvent, Rng, StageConfig};

pub use runner::{BufferRenderer, StageRunner};
pub use speech::WebSpeech;
pub use surface::WebSurfaceHost;

type WebRunner = StageRunner<WebSurfaceHost, WebSpeech>;

thread_local! {
    static RUNNER: RefCell<Option<WebRunner>> = const { RefCell::new(None) };
}

const NOT_INITIALIZED: &str = "stage not initialized, call viseme_init() first";

/// Run `f` against the runner. Returns `None` (and logs) before `viseme_init`.
fn with_runner<R>(f: impl FnOnce(&mut WebRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("{}", NOT_INITIALIZED);
                None
            }
        }
    })
}

/// Build the stage. `config_json` may override any `StageConfig` field;
/// a malformed config is logged and the defaults are used.
#[wasm_bindgen]
pub fn viseme_init(config_json: Option<String>) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = match config_json.as_deref().map(StageConfig::from_json) {
        Some(Ok(config)) => config,
        Some(Err(err)) => {
            log::warn!("bad stage config, using defaults: {}", err);
            StageConfig::default()
        }
        None => StageConfig::default(),
    };

    let speech = WebSpeech::new(config.speech_lang.clone());
    let rng = Rng::from_unit(js_sys::Math::random());
    let runner = StageRunner::new(config, WebSurfaceHost::new(""), speech, rng);

    RUNNER.with(|cell| {
        // Dropping a previous runner must not orphan its canvas.
        if let Some(mut old) = cell.borrow_mut().replace(runner) {
            old.unmount();
        }
    });
    log::info!("viseme: initialized");
}

/// Attach the canvas to the element with id `container_id`.
/// Fails if the stage is not initialized or the container is missing.
#[wasm_bindgen]
pub fn viseme_mount(container_id: &str) -> Result<(), JsValue> {
    mount_runner(container_id).map_err(|msg| JsValue::from_str(&msg))
}

fn mount_runner(container_id: &str) -> Result<(), String> {
    with_runner(|r| {
        r.surface_mut().host_mut().set_container(container_id);
        r.mount().map_err(|err| err.to_string())
    })
    .unwrap_or_else(|| Err(NOT_INITIALIZED.to_string()))
}

/// Remove the canvas. Safe to call when nothing is mounted.
#[wasm_bindgen]
pub fn viseme_unmount() {
    with_runner(|r| r.unmount());
}

#[wasm_bindgen]
pub fn viseme_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn viseme_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn viseme_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

/// The page must bind this to `window`, not the canvas, so a release
/// outside the canvas still ends the drag.
#[wasm_bindgen]
pub fn viseme_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

// ---- Lesson ----

#[wasm_bindgen]
pub fn viseme_play_word() {
    with_runner(|r| r.play_word());
}

#[wasm_bindgen]
pub fn viseme_next_word() -> String {
    with_runner(|r| r.next_word()).unwrap_or_default()
}

/// Returns false if a session is already open; the page should not start
/// another recognizer in that case.
#[wasm_bindgen]
pub fn viseme_start_listening() -> bool {
    with_runner(|r| r.start_listening()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn viseme_submit_transcript(transcript: &str) {
    with_runner(|r| r.submit_transcript(transcript));
}

/// Recognition ended without a result (denied, no speech, network).
#[wasm_bindgen]
pub fn viseme_listening_failed(reason: &str) {
    with_runner(|r| r.listening_failed(reason));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_frame_ptr() -> *const f32 {
    with_runner(|r| r.frame_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_frame_len() -> u32 {
    with_runner(|r| r.frame_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_score() -> u32 {
    with_runner(|r| r.lesson().score()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_feedback() -> String {
    with_runner(|r| r.lesson().feedback().to_string()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_current_word() -> String {
    with_runner(|r| r.lesson().current_word().to_string()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn is_listening() -> bool {
    with_runner(|r| r.lesson().is_listening()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn is_mounted() -> bool {
    with_runner(|r| r.surface().is_mounted()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn get_speech_lang() -> String {
    with_runner(|r| r.stage().config().speech_lang.clone()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_surface_width() -> u32 {
    with_runner(|r| r.stage().config().surface_width).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_surface_height() -> u32 {
    with_runner(|r| r.stage().config().surface_height).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_before_init_is_an_error() {
        // Each test thread starts with an empty runner slot.
        let err = mount_runner("stage").unwrap_err();
        assert!(err.contains("not initialized"), "got {}", err);
        assert!(!is_mounted());
    }
}
