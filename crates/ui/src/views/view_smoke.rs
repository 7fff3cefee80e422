use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use quiz_core::model::{
    AnswerSubmission, AnswerType, BatchSummary, ContinueOutcome, Evaluation, Feedback, Level,
    Question, QuestionId, Score, SessionId, StartOutcome,
};
use services::{QuestionService, QuestionServiceError};

use super::test_harness::setup_view_harness;

fn question(index: u32, total: u32) -> Question {
    Question::new(
        QuestionId::new(format!("q-{index}")),
        index,
        total,
        "What is an atom?",
        AnswerType::Text,
    )
    .unwrap()
}

#[derive(Default)]
struct ScriptedService {
    starts: Mutex<VecDeque<StartOutcome>>,
    submits: Mutex<VecDeque<Evaluation>>,
    continues: Mutex<VecDeque<ContinueOutcome>>,
}

impl ScriptedService {
    fn with_start(self, outcome: StartOutcome) -> Self {
        self.starts.lock().unwrap().push_back(outcome);
        self
    }

    fn with_submit(self, evaluation: Evaluation) -> Self {
        self.submits.lock().unwrap().push_back(evaluation);
        self
    }

    fn with_continue(self, outcome: ContinueOutcome) -> Self {
        self.continues.lock().unwrap().push_back(outcome);
        self
    }
}

#[async_trait]
impl QuestionService for ScriptedService {
    async fn start(
        &self,
        _subject: &str,
        _level: Level,
    ) -> Result<StartOutcome, QuestionServiceError> {
        Ok(self
            .starts
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected start call"))
    }

    async fn submit(
        &self,
        _session_id: &SessionId,
        _submission: &AnswerSubmission,
    ) -> Result<Evaluation, QuestionServiceError> {
        Ok(self
            .submits
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected submit call"))
    }

    async fn continue_batch(
        &self,
        _session_id: &SessionId,
        _wants_more: bool,
    ) -> Result<ContinueOutcome, QuestionServiceError> {
        Ok(self
            .continues
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected continue call"))
    }
}

fn started_service(total: u32) -> ScriptedService {
    ScriptedService::default().with_start(StartOutcome {
        session_id: SessionId::new("s-1"),
        level: Level::HighSchool,
        question: Some(question(0, total)),
    })
}

#[tokio::test(flavor = "current_thread")]
async fn idle_view_renders_start_form() {
    let mut harness = setup_view_harness(Arc::new(ScriptedService::default()));
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Start a quiz"), "missing start card in {html}");
    assert!(html.contains("Subject"), "missing subject label in {html}");
    assert!(
        html.contains("High School Level"),
        "missing default level option in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn question_view_renders_prompt_and_progress() {
    let mut harness = setup_view_harness(Arc::new(started_service(5)));
    harness
        .controller
        .start("atoms", Level::HighSchool)
        .await
        .expect("start");

    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("What is an atom?"), "missing prompt in {html}");
    assert!(
        html.contains("Question 1 of 5"),
        "missing progress label in {html}"
    );
    assert!(html.contains("Submit"), "missing submit button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn feedback_view_renders_score_and_reveal() {
    let service = started_service(5).with_submit(Evaluation {
        feedback: Feedback::new(
            Score::new(7).unwrap(),
            "Close enough",
            "Atoms bond into molecules.",
            "a molecule",
        ),
        next_question: Some(question(1, 5)),
        batch_complete: false,
    });
    let mut harness = setup_view_harness(Arc::new(service));
    harness
        .controller
        .start("atoms", Level::HighSchool)
        .await
        .expect("start");
    harness.controller.set_draft("a thing");
    harness.controller.submit().await.expect("submit");

    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("7 / 10"), "missing score in {html}");
    assert!(
        html.contains("Correct answer:"),
        "missing reveal in {html}"
    );
    assert!(html.contains("a molecule"), "missing answer in {html}");
    assert!(html.contains("Next"), "missing next button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn batch_complete_view_offers_continue_and_finish() {
    let service = started_service(1).with_submit(Evaluation {
        feedback: Feedback::new(Score::new(9).unwrap(), "", "", ""),
        next_question: None,
        batch_complete: true,
    });
    let mut harness = setup_view_harness(Arc::new(service));
    harness
        .controller
        .start("atoms", Level::HighSchool)
        .await
        .expect("start");
    harness.controller.set_draft("done");
    harness.controller.submit().await.expect("submit");
    assert!(harness.controller.advance());

    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Batch complete"), "missing card in {html}");
    assert!(html.contains("Continue"), "missing continue in {html}");
    assert!(html.contains("Finish"), "missing finish in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn finished_view_renders_summary_tiles() {
    let service = started_service(1)
        .with_submit(Evaluation {
            feedback: Feedback::new(Score::new(9).unwrap(), "", "", ""),
            next_question: None,
            batch_complete: true,
        })
        .with_continue(ContinueOutcome {
            level: Level::HighSchool,
            question: None,
            summary: Some(BatchSummary::new(5, 37, 7.4)),
        });
    let mut harness = setup_view_harness(Arc::new(service));
    harness
        .controller
        .start("atoms", Level::HighSchool)
        .await
        .expect("start");
    harness.controller.set_draft("done");
    harness.controller.submit().await.expect("submit");
    assert!(harness.controller.advance());
    harness
        .controller
        .continue_batch(false)
        .await
        .expect("continue");

    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Quiz finished"), "missing title in {html}");
    assert!(html.contains("37 / 50"), "missing points tile in {html}");
    assert!(html.contains("7.4"), "missing average tile in {html}");
    assert!(html.contains("Start Over"), "missing reset in {html}");
}
