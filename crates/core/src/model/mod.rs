mod feedback;
mod ids;
mod level;
mod question;
mod session;
mod summary;
mod theme;

pub use feedback::{Feedback, Score, ScoreError};
pub use ids::{QuestionId, SessionId};
pub use level::{Level, ParseLevelError};
pub use question::{AnswerType, Question, QuestionError};
pub use session::{
    AnswerSubmission, ContinueOutcome, Evaluation, PendingAdvance, QuizSession, SessionState,
    StartOutcome,
};
pub use summary::BatchSummary;
pub use theme::{ParseThemeError, ThemePreference};
