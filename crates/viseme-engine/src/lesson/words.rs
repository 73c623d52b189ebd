use crate::core::rng::Rng;

/// Practice words, in display order.
pub const WORDS: [&str; 5] = ["Hello", "Thank You", "Please", "Good Morning", "Smile"];

/// Word shown when a lesson starts.
pub const INITIAL_WORD: &str = WORDS[0];

/// Uniform random draws from `WORDS`. A draw may repeat the current word.
#[derive(Debug, Clone)]
pub struct WordDeck {
    rng: Rng,
}

impl WordDeck {
    pub fn new(rng: Rng) -> Self {
        Self { rng }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Rng::new(seed))
    }

    pub fn draw(&mut self) -> &'static str {
        self.rng.pick(&WORDS).copied().unwrap_or(INITIAL_WORD)
    }
}
