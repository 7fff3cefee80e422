use std::sync::{Arc, Mutex, PoisonError};

use quiz_core::model::{AnswerSubmission, Level, QuizSession, SessionId};

use crate::error::QuestionServiceError;
use crate::question_service::QuestionService;

/// Result of a controller operation that may have been guarded away.
///
/// `Ignored` covers every silent rejection: a request already in flight,
/// an invalid-state call, an empty answer, a double submit. None of these
/// reach the network or mutate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionUpdate {
    Applied,
    Ignored,
}

struct Inner {
    session: QuizSession,
    draft: String,
    in_flight: bool,
}

/// Drives the session state machine against a `QuestionService`.
///
/// Cloning shares the same session. Each remote operation performs a single
/// request with the state lock released, then applies the response atomically
/// on success only; a failed request leaves the machine and the draft exactly
/// as they were, so retry is just re-invoking the same action. One `in_flight`
/// flag serves all three remote operations: while any request is pending,
/// further remote calls are ignored rather than queued.
#[derive(Clone)]
pub struct SessionController {
    service: Arc<dyn QuestionService>,
    inner: Arc<Mutex<Inner>>,
}

impl SessionController {
    #[must_use]
    pub fn new(service: Arc<dyn QuestionService>) -> Self {
        Self {
            service,
            inner: Arc::new(Mutex::new(Inner {
                session: QuizSession::new(),
                draft: String::new(),
                in_flight: false,
            })),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock only means another thread panicked mid-render;
        // the session data itself is still the last consistent state.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cheap copy of the machine for rendering.
    #[must_use]
    pub fn snapshot(&self) -> QuizSession {
        self.lock().session.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().in_flight
    }

    #[must_use]
    pub fn draft(&self) -> String {
        self.lock().draft.clone()
    }

    pub fn set_draft(&self, draft: impl Into<String>) {
        self.lock().draft = draft.into();
    }

    /// Begin a session. Ignored unless idle, not loading, and the subject is
    /// non-empty after trimming.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError` from the service, with state unchanged.
    pub async fn start(
        &self,
        subject: &str,
        level: Level,
    ) -> Result<SessionUpdate, QuestionServiceError> {
        let subject = subject.trim();
        {
            let mut inner = self.lock();
            if inner.in_flight || !inner.session.is_idle() || subject.is_empty() {
                return Ok(SessionUpdate::Ignored);
            }
            inner.in_flight = true;
        }

        let result = self.service.start(subject, level).await;

        let mut inner = self.lock();
        inner.in_flight = false;
        let outcome = result?;
        inner.session.apply_start(outcome);
        inner.draft.clear();
        Ok(SessionUpdate::Applied)
    }

    /// Submit the current draft answer. Trims it first; ignored while
    /// loading, when no question is awaiting an answer (which covers the
    /// double-submit case), or when the trimmed draft is empty.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError` from the service, with state and draft
    /// unchanged so the user can retry.
    pub async fn submit(&self) -> Result<SessionUpdate, QuestionServiceError> {
        let (session_id, submission): (SessionId, AnswerSubmission) = {
            let mut inner = self.lock();
            if inner.in_flight {
                return Ok(SessionUpdate::Ignored);
            }
            let Some(submission) = inner.session.prepare_submit(&inner.draft) else {
                return Ok(SessionUpdate::Ignored);
            };
            let Some(session_id) = inner.session.session_id().cloned() else {
                return Ok(SessionUpdate::Ignored);
            };
            inner.in_flight = true;
            (session_id, submission)
        };

        let result = self.service.submit(&session_id, &submission).await;

        let mut inner = self.lock();
        inner.in_flight = false;
        let evaluation = result?;
        inner.session.apply_submit(evaluation);
        inner.draft.clear();
        Ok(SessionUpdate::Applied)
    }

    /// Leave the feedback screen. Purely local; no-op outside `FeedbackShown`.
    pub fn advance(&self) -> bool {
        self.lock().session.advance()
    }

    /// Close the finished batch: ask for another one or for the final
    /// summary. Ignored while loading or outside the batch-complete state.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError` from the service, with state unchanged.
    pub async fn continue_batch(
        &self,
        wants_more: bool,
    ) -> Result<SessionUpdate, QuestionServiceError> {
        let session_id = {
            let mut inner = self.lock();
            if inner.in_flight || !inner.session.is_batch_complete() {
                return Ok(SessionUpdate::Ignored);
            }
            let Some(session_id) = inner.session.session_id().cloned() else {
                return Ok(SessionUpdate::Ignored);
            };
            inner.in_flight = true;
            session_id
        };

        let result = self.service.continue_batch(&session_id, wants_more).await;

        let mut inner = self.lock();
        inner.in_flight = false;
        let outcome = result?;
        inner.session.apply_continue(outcome);
        inner.draft.clear();
        Ok(SessionUpdate::Applied)
    }

    /// Abandon the session and return to idle. No-op while a request is in
    /// flight.
    pub fn reset(&self) -> bool {
        let mut inner = self.lock();
        if inner.in_flight {
            return false;
        }
        inner.session.reset();
        inner.draft.clear();
        true
    }
}
