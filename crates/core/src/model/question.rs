use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::QuestionId;

/// Expected shape of the answer for a question.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerType {
    #[default]
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "numeric")]
    Numeric,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question index {index} is out of range for batch of {total}")]
    IndexOutOfRange { index: u32, total: u32 },

    #[error("question prompt is empty")]
    EmptyPrompt,
}

/// One question as issued by the service. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    index: u32,
    total: u32,
    prompt: String,
    answer_type: AnswerType,
}

impl Question {
    /// Build a question from a service payload.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::IndexOutOfRange` if `index` does not fall
    /// inside the batch, or `QuestionError::EmptyPrompt` for a blank prompt.
    pub fn new(
        id: QuestionId,
        index: u32,
        total: u32,
        prompt: impl Into<String>,
        answer_type: AnswerType,
    ) -> Result<Self, QuestionError> {
        if index >= total {
            return Err(QuestionError::IndexOutOfRange { index, total });
        }
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        Ok(Self {
            id,
            index,
            total,
            prompt,
            answer_type,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    /// Zero-based position inside the batch.
    #[must_use]
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Number of questions in the batch this question belongs to.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn answer_type(&self) -> AnswerType {
        self.answer_type
    }

    /// One-based position, for display ("Question 2 of 5").
    #[must_use]
    pub fn position(&self) -> u32 {
        self.index + 1
    }
}
