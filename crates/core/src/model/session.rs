use crate::model::{BatchSummary, Feedback, Level, Question, QuestionId, SessionId};

//
// ─── SERVICE OUTCOMES ──────────────────────────────────────────────────────────
//

/// Decoded response of the `start` operation.
#[derive(Debug, Clone, PartialEq)]
pub struct StartOutcome {
    pub session_id: SessionId,
    pub level: Level,
    pub question: Option<Question>,
}

/// Decoded response of the `submit` operation.
///
/// `next_question` is the look-ahead: it is cached, never shown, until the
/// user explicitly advances past the feedback.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub feedback: Feedback,
    pub next_question: Option<Question>,
    pub batch_complete: bool,
}

/// Decoded response of the `continue` operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinueOutcome {
    pub level: Level,
    pub question: Option<Question>,
    pub summary: Option<BatchSummary>,
}

/// Request data for one answer submission, produced by the submit guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSubmission {
    pub question_id: QuestionId,
    pub answer: String,
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Two-slot look-ahead buffer filled at submit time.
///
/// `next` is fetched alongside the feedback but withheld from display; it is
/// swapped into the current slot only by an explicit `advance`.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAdvance {
    next: Option<Question>,
    batch_complete: bool,
}

impl PendingAdvance {
    #[must_use]
    pub fn batch_complete(&self) -> bool {
        self.batch_complete
    }

    #[must_use]
    pub fn next(&self) -> Option<&Question> {
        self.next.as_ref()
    }
}

/// Tagged session state. Each variant carries exactly the data valid in it,
/// so the invalid flag combinations of a boolean soup cannot be represented.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    /// No session yet, or session finished and discarded.
    #[default]
    Idle,
    /// A question is on screen and the answer input is live.
    AwaitingAnswer { question: Question },
    /// Feedback for the current question is on screen; input is locked and
    /// the next step is cached but hidden.
    FeedbackShown {
        question: Question,
        feedback: Feedback,
        pending: PendingAdvance,
    },
    /// No current question. Reached past the end of a batch, or when the
    /// service reports it has no more content.
    BatchComplete { summary: Option<BatchSummary> },
}

//
// ─── SESSION MACHINE ───────────────────────────────────────────────────────────
//

/// Client-side session state machine.
///
/// Holds the current question, the pending look-ahead, the feedback, and the
/// per-batch progress counter, and applies service responses as atomic
/// transitions. All guards (wrong state, empty answer, double submit) are
/// silent rejections; network failures never reach this type, so a failed
/// request leaves the machine exactly where it was.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizSession {
    session_id: Option<SessionId>,
    level: Level,
    state: SessionState,
    answered: u32,
}

impl QuizSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Answers submitted in the current batch. Monotonic within a batch,
    /// reset on every batch start.
    #[must_use]
    pub fn answered(&self) -> u32 {
        self.answered
    }

    /// Batch size, read from whatever question payload is live. Zero when no
    /// question is held (idle or batch complete).
    #[must_use]
    pub fn total(&self) -> u32 {
        match &self.state {
            SessionState::AwaitingAnswer { question }
            | SessionState::FeedbackShown { question, .. } => question.total(),
            SessionState::Idle | SessionState::BatchComplete { .. } => 0,
        }
    }

    /// Progress through the batch in whole percent; 0 whenever `total` is 0.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        let pct = (f64::from(self.answered) * 100.0 / f64::from(total)).round();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            pct.clamp(0.0, 100.0) as u8
        }
    }

    /// The question currently on screen, if any.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match &self.state {
            SessionState::AwaitingAnswer { question }
            | SessionState::FeedbackShown { question, .. } => Some(question),
            SessionState::Idle | SessionState::BatchComplete { .. } => None,
        }
    }

    /// Feedback for the current question. Non-`None` only in `FeedbackShown`.
    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        match &self.state {
            SessionState::FeedbackShown { feedback, .. } => Some(feedback),
            _ => None,
        }
    }

    /// Summary retained for display in the batch-complete state.
    #[must_use]
    pub fn summary(&self) -> Option<&BatchSummary> {
        match &self.state {
            SessionState::BatchComplete { summary } => summary.as_ref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self.state, SessionState::Idle)
    }

    #[must_use]
    pub fn is_awaiting_answer(&self) -> bool {
        matches!(self.state, SessionState::AwaitingAnswer { .. })
    }

    #[must_use]
    pub fn is_batch_complete(&self) -> bool {
        matches!(self.state, SessionState::BatchComplete { .. })
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────
    //

    /// Adopt a successful `start` response: fresh session id and level, the
    /// first question (or straight to batch-complete when the service has no
    /// content), progress counter reset.
    pub fn apply_start(&mut self, outcome: StartOutcome) {
        self.session_id = Some(outcome.session_id);
        self.level = outcome.level;
        self.answered = 0;
        self.state = match outcome.question {
            Some(question) => SessionState::AwaitingAnswer { question },
            None => SessionState::BatchComplete { summary: None },
        };
    }

    /// Guard half of `submit`: decide whether a network call may happen.
    ///
    /// Returns `None` (and nothing must be sent) unless a question is
    /// awaiting an answer and the trimmed draft is non-empty. A call while
    /// feedback is already shown is the double-submit case and falls out of
    /// the same match.
    #[must_use]
    pub fn prepare_submit(&self, draft: &str) -> Option<AnswerSubmission> {
        let SessionState::AwaitingAnswer { question } = &self.state else {
            return None;
        };
        let answer = draft.trim();
        if answer.is_empty() {
            return None;
        }
        Some(AnswerSubmission {
            question_id: question.id().clone(),
            answer: answer.to_string(),
        })
    }

    /// Adopt a successful `submit` response: show feedback, cache the
    /// look-ahead without revealing it, bump the progress counter.
    ///
    /// The increment is clamped to `total` so a service that reports an
    /// inconsistent batch size mid-batch cannot push progress past 100%.
    /// Returns `false` (untouched state) outside `AwaitingAnswer`.
    pub fn apply_submit(&mut self, evaluation: Evaluation) -> bool {
        match std::mem::take(&mut self.state) {
            SessionState::AwaitingAnswer { question } => {
                let total = question.total();
                self.answered = if total == 0 {
                    self.answered + 1
                } else {
                    total.min(self.answered + 1)
                };

                self.state = SessionState::FeedbackShown {
                    question,
                    feedback: evaluation.feedback,
                    pending: PendingAdvance {
                        next: evaluation.next_question,
                        batch_complete: evaluation.batch_complete,
                    },
                };
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Leave the feedback screen: either reveal the cached next question or
    /// enter batch-complete. No-op (returns `false`) in every other state,
    /// including repeated calls once the batch is complete.
    pub fn advance(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            SessionState::FeedbackShown { pending, .. } => {
                self.state = if pending.batch_complete {
                    // The cached next question, if any, is meaningless past
                    // the end of the batch; drop it.
                    SessionState::BatchComplete { summary: None }
                } else {
                    match pending.next {
                        Some(question) => SessionState::AwaitingAnswer { question },
                        None => SessionState::BatchComplete { summary: None },
                    }
                };
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Adopt a successful `continue` response: new level, a fresh batch (or
    /// the terminal state with the summary retained), counters reset.
    /// Returns `false` outside `BatchComplete`.
    pub fn apply_continue(&mut self, outcome: ContinueOutcome) -> bool {
        if !self.is_batch_complete() {
            return false;
        }

        self.level = outcome.level;
        self.answered = 0;
        self.state = match outcome.question {
            Some(question) => SessionState::AwaitingAnswer { question },
            None => SessionState::BatchComplete {
                summary: outcome.summary,
            },
        };
        true
    }

    /// Abandon the session and return to `Idle`, discarding the session id
    /// and any retained summary. The server-side session simply expires.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerType, Score};

    fn question(index: u32, total: u32) -> Question {
        Question::new(
            QuestionId::new(format!("q-{index}")),
            index,
            total,
            format!("Prompt {index}"),
            AnswerType::Text,
        )
        .unwrap()
    }

    fn feedback(score: u32) -> Feedback {
        Feedback::new(Score::new(score).unwrap(), "reason", "explanation", "42")
    }

    fn started(total: u32) -> QuizSession {
        let mut session = QuizSession::new();
        session.apply_start(StartOutcome {
            session_id: SessionId::new("s-1"),
            level: Level::HighSchool,
            question: Some(question(0, total)),
        });
        session
    }

    fn evaluation(next: Option<Question>, batch_complete: bool) -> Evaluation {
        Evaluation {
            feedback: feedback(7),
            next_question: next,
            batch_complete,
        }
    }

    #[test]
    fn fresh_session_is_idle_with_zero_progress() {
        let session = QuizSession::new();
        assert!(session.is_idle());
        assert_eq!(session.progress_percent(), 0);
        assert_eq!(session.total(), 0);
        assert!(session.current_question().is_none());
    }

    #[test]
    fn start_enters_awaiting_answer_and_resets_progress() {
        let session = started(5);
        assert!(session.is_awaiting_answer());
        assert_eq!(session.answered(), 0);
        assert_eq!(session.total(), 5);
        assert_eq!(session.session_id().unwrap().as_str(), "s-1");
    }

    #[test]
    fn start_without_question_lands_in_batch_complete() {
        let mut session = QuizSession::new();
        session.apply_start(StartOutcome {
            session_id: SessionId::new("s-1"),
            level: Level::HighSchool,
            question: None,
        });
        assert!(session.is_batch_complete());
        assert_eq!(session.progress_percent(), 0);
        // A terminated session has nothing to advance past.
        assert!(!session.advance());
    }

    #[test]
    fn prepare_submit_trims_and_rejects_empty() {
        let session = started(5);
        assert!(session.prepare_submit("   ").is_none());
        let submission = session.prepare_submit("  a thing  ").unwrap();
        assert_eq!(submission.answer, "a thing");
        assert_eq!(submission.question_id.as_str(), "q-0");
    }

    #[test]
    fn prepare_submit_is_a_noop_while_feedback_is_shown() {
        let mut session = started(5);
        assert!(session.apply_submit(evaluation(Some(question(1, 5)), false)));
        // Double-submit guard: feedback is present, so nothing may be sent.
        assert!(session.prepare_submit("again").is_none());
        assert_eq!(session.answered(), 1);
    }

    #[test]
    fn submit_shows_feedback_but_not_the_next_question() {
        let mut session = started(5);
        assert!(session.apply_submit(evaluation(Some(question(1, 5)), false)));

        assert_eq!(session.feedback().unwrap().score().value(), 7);
        // Still the submitted question on screen, not the cached one.
        assert_eq!(session.current_question().unwrap().index(), 0);
        assert_eq!(session.answered(), 1);
        assert_eq!(session.progress_percent(), 20);
    }

    #[test]
    fn advance_reveals_the_cached_question() {
        let mut session = started(5);
        session.apply_submit(evaluation(Some(question(1, 5)), false));
        assert!(session.advance());

        assert!(session.is_awaiting_answer());
        assert_eq!(session.current_question().unwrap().position(), 2);
        assert!(session.feedback().is_none());
        assert_eq!(session.progress_percent(), 20);
    }

    #[test]
    fn advance_outside_feedback_is_a_noop() {
        let mut session = started(5);
        assert!(!session.advance());
        assert!(session.is_awaiting_answer());
    }

    #[test]
    fn batch_complete_discards_cached_question() {
        let mut session = started(5);
        // Inconsistent service: batch_complete with a question attached.
        session.apply_submit(evaluation(Some(question(1, 5)), true));
        assert!(session.advance());

        assert!(session.is_batch_complete());
        assert!(session.current_question().is_none());
        assert!(!session.advance());
    }

    #[test]
    fn answered_never_exceeds_total() {
        let mut session = started(2);
        for _ in 0..4 {
            // The service keeps returning the same question; the clamp keeps
            // the counter within the batch.
            session.apply_submit(evaluation(Some(question(0, 2)), false));
            assert!(session.answered() <= session.total());
            session.advance();
        }
        assert_eq!(session.answered(), 2);
        assert_eq!(session.progress_percent(), 100);
    }

    #[test]
    fn clamp_holds_when_total_shrinks_mid_batch() {
        let mut session = started(5);
        session.apply_submit(evaluation(Some(question(1, 2)), false));
        session.advance();
        // total now reads 2 from the new question while answered is 1.
        session.apply_submit(evaluation(Some(question(0, 2)), false));
        assert_eq!(session.answered(), 2);
        assert_eq!(session.progress_percent(), 100);
        session.advance();
        session.apply_submit(evaluation(None, true));
        assert_eq!(session.answered(), 2);
    }

    #[test]
    fn continue_starts_a_new_batch_and_resets_counters() {
        let mut session = started(1);
        session.apply_submit(evaluation(None, true));
        session.advance();
        assert!(session.is_batch_complete());

        assert!(session.apply_continue(ContinueOutcome {
            level: Level::Undergraduate,
            question: Some(question(0, 5)),
            summary: Some(BatchSummary::new(1, 7, 7.0)),
        }));

        assert_eq!(session.level(), Level::Undergraduate);
        assert_eq!(session.answered(), 0);
        assert_eq!(session.progress_percent(), 0);
        assert!(session.is_awaiting_answer());
        // The summary belongs to the finished batch; it is not carried into
        // the new one.
        assert!(session.summary().is_none());
    }

    #[test]
    fn finish_retains_summary_in_terminal_state() {
        let mut session = started(1);
        session.apply_submit(evaluation(None, true));
        session.advance();

        assert!(session.apply_continue(ContinueOutcome {
            level: Level::HighSchool,
            question: None,
            summary: Some(BatchSummary::new(5, 37, 7.4)),
        }));

        assert!(session.is_batch_complete());
        let summary = session.summary().unwrap();
        assert_eq!(summary.count(), 5);
        assert_eq!(summary.total(), 37);
        assert!(!session.advance());
    }

    #[test]
    fn continue_is_rejected_outside_batch_complete() {
        let mut session = started(5);
        assert!(!session.apply_continue(ContinueOutcome {
            level: Level::HighSchool,
            question: Some(question(0, 5)),
            summary: None,
        }));
        assert!(session.is_awaiting_answer());
        assert_eq!(session.total(), 5);
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut session = started(5);
        session.apply_submit(evaluation(None, true));
        session.reset();
        assert!(session.is_idle());
        assert!(session.session_id().is_none());
        assert_eq!(session.answered(), 0);
    }

    #[test]
    fn full_batch_scenario_matches_expected_progress() {
        // start("atoms", High School) -> Q1 of 5, submit -> 7/10, advance.
        let mut session = started(5);
        let submission = session.prepare_submit("a thing").unwrap();
        assert_eq!(submission.answer, "a thing");
        session.apply_submit(evaluation(Some(question(1, 5)), false));
        session.advance();

        let current = session.current_question().unwrap();
        assert_eq!(current.position(), 2);
        assert_eq!(current.total(), 5);
        assert_eq!(session.progress_percent(), 20);
    }
}
