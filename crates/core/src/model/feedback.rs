use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("score {raw} is outside 0..=10")]
pub struct ScoreError {
    raw: u32,
}

/// A grade in 0..=10 as assigned by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Score(u8);

impl Score {
    pub const MAX: u8 = 10;

    /// # Errors
    ///
    /// Returns `ScoreError` if `value` exceeds 10.
    pub fn new(value: u32) -> Result<Self, ScoreError> {
        if value > u32::from(Self::MAX) {
            return Err(ScoreError { raw: value });
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self(value as u8))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

/// Scored response to one submitted answer.
///
/// Produced once per submission and immutable; it stays attached to the
/// question it grades until the user advances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    score: Score,
    reason: String,
    explanation: String,
    correct_answer: String,
}

impl Feedback {
    #[must_use]
    pub fn new(
        score: Score,
        reason: impl Into<String>,
        explanation: impl Into<String>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            score,
            reason: reason.into(),
            explanation: explanation.into(),
            correct_answer: correct_answer.into(),
        }
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.score
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }
}
