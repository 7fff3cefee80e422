use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use quiz_core::model::{
    AnswerSubmission, AnswerType, BatchSummary, ContinueOutcome, Evaluation, Feedback, Level,
    Question, QuestionId, Score, SessionId, StartOutcome,
};

use crate::error::QuestionServiceError;

/// The three remote operations of the question service.
///
/// Implementations perform exactly one request per call and never retry;
/// retrying is the caller re-invoking the same user action.
#[async_trait]
pub trait QuestionService: Send + Sync {
    /// Open a session for a subject at a difficulty tier.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError` on transport or contract failures.
    async fn start(
        &self,
        subject: &str,
        level: Level,
    ) -> Result<StartOutcome, QuestionServiceError>;

    /// Submit one answer for grading.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError` on transport or contract failures.
    async fn submit(
        &self,
        session_id: &SessionId,
        submission: &AnswerSubmission,
    ) -> Result<Evaluation, QuestionServiceError>;

    /// Close the finished batch and ask for another one (or for the final
    /// summary when `wants_more` is false).
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError` on transport or contract failures.
    async fn continue_batch(
        &self,
        session_id: &SessionId,
        wants_more: bool,
    ) -> Result<ContinueOutcome, QuestionServiceError>;
}

#[derive(Clone, Debug)]
pub struct QuestionApiConfig {
    pub base_url: String,
}

impl QuestionApiConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8000";

    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            env::var("QUIZ_API_BASE_URL").unwrap_or_else(|_| Self::DEFAULT_BASE_URL.into());
        Self { base_url }
    }
}

/// HTTP implementation of `QuestionService`.
#[derive(Clone)]
pub struct HttpQuestionService {
    client: Client,
    base_url: String,
}

impl HttpQuestionService {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(QuestionApiConfig::from_env())
    }

    #[must_use]
    pub fn new(config: QuestionApiConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn post<Req, Res>(&self, path: &str, payload: &Req) -> Result<Res, QuestionServiceError>
    where
        Req: Serialize + Sync,
        Res: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{path}", self.base_url);
        let response = self.client.post(url).json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QuestionServiceError::Status { status, body });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl QuestionService for HttpQuestionService {
    async fn start(
        &self,
        subject: &str,
        level: Level,
    ) -> Result<StartOutcome, QuestionServiceError> {
        let response: StartResponse = self
            .post("/api/start", &StartRequest { subject, level })
            .await?;
        response.into_outcome()
    }

    async fn submit(
        &self,
        session_id: &SessionId,
        submission: &AnswerSubmission,
    ) -> Result<Evaluation, QuestionServiceError> {
        let response: AnswerResponse = self
            .post(
                "/api/answer",
                &AnswerRequest {
                    session_id: session_id.as_str(),
                    q_id: submission.question_id.as_str(),
                    answer: &submission.answer,
                },
            )
            .await?;
        response.into_evaluation()
    }

    async fn continue_batch(
        &self,
        session_id: &SessionId,
        wants_more: bool,
    ) -> Result<ContinueOutcome, QuestionServiceError> {
        let response: ContinueResponse = self
            .post(
                "/api/continue",
                &ContinueRequest {
                    session_id: session_id.as_str(),
                    wants_more,
                },
            )
            .await?;
        response.into_outcome()
    }
}

//
// ─── WIRE DTOS ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
struct StartRequest<'a> {
    subject: &'a str,
    level: Level,
}

#[derive(Debug, Deserialize)]
struct StartResponse {
    session_id: String,
    level: Level,
    question: Option<QuestionDto>,
}

impl StartResponse {
    fn into_outcome(self) -> Result<StartOutcome, QuestionServiceError> {
        Ok(StartOutcome {
            session_id: SessionId::new(self.session_id),
            level: self.level,
            question: self.question.map(QuestionDto::into_question).transpose()?,
        })
    }
}

#[derive(Debug, Serialize)]
struct AnswerRequest<'a> {
    session_id: &'a str,
    q_id: &'a str,
    answer: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnswerResponse {
    score: u32,
    reason: String,
    correct_answer: String,
    explanation: String,
    next_question: Option<QuestionDto>,
    batch_complete: bool,
}

impl AnswerResponse {
    fn into_evaluation(self) -> Result<Evaluation, QuestionServiceError> {
        let score =
            Score::new(self.score).map_err(|err| QuestionServiceError::Payload(err.to_string()))?;
        Ok(Evaluation {
            feedback: Feedback::new(score, self.reason, self.explanation, self.correct_answer),
            next_question: self
                .next_question
                .map(QuestionDto::into_question)
                .transpose()?,
            batch_complete: self.batch_complete,
        })
    }
}

#[derive(Debug, Serialize)]
struct ContinueRequest<'a> {
    session_id: &'a str,
    #[serde(rename = "continue")]
    wants_more: bool,
}

#[derive(Debug, Deserialize)]
struct ContinueResponse {
    level: Level,
    question: Option<QuestionDto>,
    batch_summary: Option<SummaryDto>,
}

impl ContinueResponse {
    fn into_outcome(self) -> Result<ContinueOutcome, QuestionServiceError> {
        Ok(ContinueOutcome {
            level: self.level,
            question: self.question.map(QuestionDto::into_question).transpose()?,
            summary: self.batch_summary.map(SummaryDto::into_summary),
        })
    }
}

#[derive(Debug, Deserialize)]
struct QuestionDto {
    index: u32,
    total: u32,
    q_id: String,
    question: String,
    #[serde(default)]
    answer_type: AnswerType,
}

impl QuestionDto {
    fn into_question(self) -> Result<Question, QuestionServiceError> {
        Question::new(
            QuestionId::new(self.q_id),
            self.index,
            self.total,
            self.question,
            self.answer_type,
        )
        .map_err(|err| QuestionServiceError::Payload(err.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct SummaryDto {
    count: u32,
    total: u32,
    avg: f64,
}

impl SummaryDto {
    fn into_summary(self) -> BatchSummary {
        BatchSummary::new(self.count, self.total, self.avg)
    }
}
