use viseme_engine::SpeechSynthesizer;
use web_sys::SpeechSynthesisUtterance;

/// Text-to-speech through the browser's `speechSynthesis`.
/// Failures are logged and otherwise ignored.
pub struct WebSpeech {
    lang: String,
}

impl WebSpeech {
    pub fn new(lang: impl Into<String>) -> Self {
        Self { lang: lang.into() }
    }
}

impl SpeechSynthesizer for WebSpeech {
    fn speak(&mut self, word: &str, rate: f32) {
        let Some(window) = web_sys::window() else {
            log::warn!("speech: no window");
            return;
        };
        let synth = match window.speech_synthesis() {
            Ok(s) => s,
            Err(err) => {
                log::warn!("speech synthesis unavailable: {:?}", err);
                return;
            }
        };
        match SpeechSynthesisUtterance::new_with_text(word) {
            Ok(utterance) => {
                utterance.set_rate(rate);
                utterance.set_lang(&self.lang);
                synth.speak(&utterance);
            }
            Err(err) => log::warn!("speech: could not build utterance: {:?}", err),
        }
    }
}
