use quiz_core::model::{AnswerType, BatchSummary, Feedback, QuizSession};

/// "Question 2 of 5", or `None` when no question is on screen.
#[must_use]
pub fn progress_label(session: &QuizSession) -> Option<String> {
    session
        .current_question()
        .map(|question| format!("Question {} of {}", question.position(), question.total()))
}

#[must_use]
pub fn score_label(feedback: &Feedback) -> String {
    format!("{} / 10", feedback.score().value())
}

/// CSS modifier for coloring the score badge.
#[must_use]
pub fn score_tone(feedback: &Feedback) -> &'static str {
    match feedback.score().value() {
        8..=10 => "feedback__score--high",
        5..=7 => "feedback__score--mid",
        _ => "feedback__score--low",
    }
}

#[must_use]
pub fn answer_placeholder(answer_type: AnswerType) -> &'static str {
    match answer_type {
        AnswerType::Text => "Type your answer",
        AnswerType::Numeric => "Enter a number",
    }
}

/// Labels for the three summary tiles on the finish screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryVm {
    pub answered: String,
    pub points: String,
    pub average: String,
}

#[must_use]
pub fn map_summary(summary: &BatchSummary) -> SummaryVm {
    SummaryVm {
        answered: summary.count().to_string(),
        points: format!("{} / {}", summary.total(), summary.max_total()),
        average: format!("{:.1} / 10", summary.avg()),
    }
}
