//! Lexical scoring of a spoken attempt against the target word.

/// Points awarded for a success-tier attempt.
pub const SUCCESS_POINTS: u32 = 10;

/// Scores above this are a success.
pub const SUCCESS_THRESHOLD: f32 = 0.7;

/// Scores above this (and not a success) are a partial match.
pub const PARTIAL_THRESHOLD: f32 = 0.5;

/// Fraction of positions where both strings hold the same character,
/// compared case-insensitively, over the longer length.
/// Two empty strings score 0.0.
pub fn similarity(a: &str, b: &str) -> f32 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 0.0;
    }
    let matches = a.iter().zip(&b).filter(|(x, y)| x == y).count();
    matches as f32 / longest as f32
}

/// Feedback tier for a similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackTier {
    Success,
    Partial,
    Mismatch,
}

impl FeedbackTier {
    pub fn from_score(score: f32) -> Self {
        if score > SUCCESS_THRESHOLD {
            FeedbackTier::Success
        } else if score > PARTIAL_THRESHOLD {
            FeedbackTier::Partial
        } else {
            FeedbackTier::Mismatch
        }
    }

    pub fn points(self) -> u32 {
        match self {
            FeedbackTier::Success => SUCCESS_POINTS,
            FeedbackTier::Partial | FeedbackTier::Mismatch => 0,
        }
    }
}

/// One scored listening session.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionResult {
    pub transcript: String,
    pub target_word: String,
    pub similarity_score: f32,
}

impl RecognitionResult {
    /// Score `transcript` against `target`. Both are lowercased first.
    pub fn score(transcript: &str, target: &str) -> Self {
        let transcript = transcript.to_lowercase();
        let target_word = target.to_lowercase();
        let similarity_score = similarity(&transcript, &target_word);
        Self {
            transcript,
            target_word,
            similarity_score,
        }
    }

    pub fn tier(&self) -> FeedbackTier {
        FeedbackTier::from_score(self.similarity_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_words_score_one() {
        assert_eq!(similarity("hello", "hello"), 1.0);
        assert_eq!(similarity("Hello", "hELLO"), 1.0);
    }

    #[test]
    fn disjoint_words_score_zero() {
        assert_eq!(similarity("cat", "dog"), 0.0);
    }

    #[test]
    fn positional_match_over_longer_length() {
        // h,l,l,o vs h,e,l,l,o: positions 0 and 2 line up.
        assert!((similarity("hllo", "hello") - 0.4).abs() < 1e-6);
        // Same prefix, one extra letter.
        assert!((similarity("hell", "hello") - 0.8).abs() < 1e-6);
        assert_eq!(similarity("hello", "hell"), similarity("hell", "hello"));
    }

    #[test]
    fn empty_strings() {
        assert_eq!(similarity("", ""), 0.0);
        assert_eq!(similarity("", "hello"), 0.0);
    }

    #[test]
    fn score_stays_in_unit_range() {
        for (a, b) in [("thank you", "thank"), ("smile", "smiles"), ("x", "please")] {
            let s = similarity(a, b);
            assert!((0.0..=1.0).contains(&s), "{} vs {} = {}", a, b, s);
        }
    }

    #[test]
    fn tiers_use_strict_thresholds() {
        assert_eq!(FeedbackTier::from_score(1.0), FeedbackTier::Success);
        assert_eq!(FeedbackTier::from_score(0.71), FeedbackTier::Success);
        assert_eq!(FeedbackTier::from_score(0.7), FeedbackTier::Partial);
        assert_eq!(FeedbackTier::from_score(0.6), FeedbackTier::Partial);
        assert_eq!(FeedbackTier::from_score(0.5), FeedbackTier::Mismatch);
        assert_eq!(FeedbackTier::from_score(0.0), FeedbackTier::Mismatch);
        assert_eq!(FeedbackTier::Success.points(), 10);
        assert_eq!(FeedbackTier::Partial.points(), 0);
    }

    #[test]
    fn result_lowercases_both_sides() {
        let r = RecognitionResult::score("THANK YOU", "Thank You");
        assert_eq!(r.transcript, "thank you");
        assert_eq!(r.target_word, "thank you");
        assert_eq!(r.similarity_score, 1.0);
        assert_eq!(r.tier(), FeedbackTier::Success);
    }
}
