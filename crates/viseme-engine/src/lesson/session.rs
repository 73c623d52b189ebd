//! One practice session: current word, score, listening flag, feedback.
//!
//! Speech synthesis and recognition live outside the engine. The lesson
//! calls out through `SpeechSynthesizer` and is handed transcripts back
//! through `receive_transcript`.

use std::fmt;

use crate::api::stage::Stage;
use crate::api::types::Generation;
use crate::lesson::scoring::{FeedbackTier, RecognitionResult};
use crate::lesson::words::{WordDeck, INITIAL_WORD};

/// Fire-and-forget text-to-speech.
pub trait SpeechSynthesizer {
    fn speak(&mut self, word: &str, rate: f32);
}

/// Message shown under the controls.
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    Initial,
    NewWord { word: String },
    Playing { word: String },
    Listening,
    Success { word: String },
    Partial { transcript: String },
    Mismatch { transcript: String },
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Initial => {
                write!(f, "Press LISTEN to begin! Watch mouth, gums, teeth & tongue!")
            }
            Feedback::NewWord { word } => write!(
                f,
                "New word: \"{}\" - Pay attention to tongue & lip movement!",
                word
            ),
            Feedback::Playing { word } => write!(
                f,
                "Watch closely! Teacher pronouncing: \"{}\" - See tongue & lip positions!",
                word
            ),
            Feedback::Listening => write!(f, "Listening... Pronounce the word now!"),
            Feedback::Success { word } => {
                write!(f, "EXCELLENT! You said \"{}\" PERFECTLY! +10 points!", word)
            }
            Feedback::Partial { transcript } => write!(
                f,
                "Good try! You said \"{}\" - Watch the teacher's mouth again & try once more",
                transcript
            ),
            Feedback::Mismatch { transcript } => write!(
                f,
                "You said \"{}\" - Different word. Listen to teacher again",
                transcript
            ),
        }
    }
}

pub struct Lesson {
    current_word: String,
    score: u32,
    listening: bool,
    feedback: Feedback,
    deck: WordDeck,
    speech_rate: f32,
    last_result: Option<RecognitionResult>,
}

impl Lesson {
    pub fn new(deck: WordDeck, speech_rate: f32) -> Self {
        Self {
            current_word: INITIAL_WORD.to_string(),
            score: 0,
            listening: false,
            feedback: Feedback::Initial,
            deck,
            speech_rate,
            last_result: None,
        }
    }

    /// Speak the current word and start its articulation in the same call.
    pub fn play_word(
        &mut self,
        stage: &mut Stage,
        speech: &mut impl SpeechSynthesizer,
    ) -> Generation {
        let generation = stage.animate_word(&self.current_word);
        speech.speak(&self.current_word, self.speech_rate);
        self.feedback = Feedback::Playing {
            word: self.current_word.clone(),
        };
        generation
    }

    /// Open a listening session. Returns false if one is already open.
    pub fn start_listening(&mut self) -> bool {
        if self.listening {
            log::debug!("already listening, ignoring start");
            return false;
        }
        self.listening = true;
        self.feedback = Feedback::Listening;
        true
    }

    /// Close the session without a transcript (microphone denied, service error).
    pub fn listening_failed(&mut self, reason: &str) {
        if self.listening {
            log::warn!("speech recognition unavailable: {}", reason);
        }
        self.listening = false;
    }

    /// Score the transcript of the open session.
    /// A transcript with no open session is dropped.
    pub fn receive_transcript(&mut self, transcript: &str) -> Option<FeedbackTier> {
        if !self.listening {
            log::debug!("transcript with no listening session, dropped");
            return None;
        }
        self.listening = false;

        let result = RecognitionResult::score(transcript, &self.current_word);
        let tier = result.tier();
        self.score += tier.points();
        self.feedback = match tier {
            FeedbackTier::Success => Feedback::Success {
                word: self.current_word.clone(),
            },
            FeedbackTier::Partial => Feedback::Partial {
                transcript: result.transcript.clone(),
            },
            FeedbackTier::Mismatch => Feedback::Mismatch {
                transcript: result.transcript.clone(),
            },
        };
        log::info!(
            "'{}' vs '{}': {:.2} ({:?})",
            result.transcript,
            result.target_word,
            result.similarity_score,
            tier
        );
        self.last_result = Some(result);
        Some(tier)
    }

    /// Pick a random word from the list.
    pub fn next_word(&mut self) -> &str {
        let word = self.deck.draw();
        self.current_word = word.to_string();
        self.feedback = Feedback::NewWord {
            word: self.current_word.clone(),
        };
        &self.current_word
    }

    pub fn current_word(&self) -> &str {
        &self.current_word
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn last_result(&self) -> Option<&RecognitionResult> {
        self.last_result.as_ref()
    }
}
