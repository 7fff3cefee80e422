use thiserror::Error;

use crate::model::{ParseLevelError, QuestionError, ScoreError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error(transparent)]
    Level(#[from] ParseLevelError),
}
