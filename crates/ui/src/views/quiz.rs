use dioxus::prelude::*;

use quiz_core::model::{
    AnswerType, BatchSummary, Feedback, Level, Question, QuizSession, ThemePreference,
};

use crate::context::AppContext;
use crate::vm::{answer_placeholder, map_summary, progress_label, score_label, score_tone};

/// The whole quiz flow on one screen. Which card is rendered follows the
/// session snapshot: start form while idle, question card while a question
/// is live, finish card once the batch is done.
#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let controller = ctx.session();
    let settings = ctx.settings();
    let mut theme = use_context::<Signal<ThemePreference>>();

    let mut snapshot = use_signal({
        let controller = controller.clone();
        move || controller.snapshot()
    });
    let subject = use_signal(String::new);
    let level = use_signal(Level::default);
    let mut draft = use_signal({
        let controller = controller.clone();
        move || controller.draft()
    });
    let mut busy = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let on_start = {
        let controller = controller.clone();
        use_callback(move |()| {
            let controller = controller.clone();
            let subject_value = subject();
            let level_value = level();
            spawn(async move {
                busy.set(true);
                match controller.start(&subject_value, level_value).await {
                    Ok(_) => error.set(None),
                    Err(err) => error.set(Some(format!("Start failed: {err}"))),
                }
                snapshot.set(controller.snapshot());
                draft.set(controller.draft());
                busy.set(false);
            });
        })
    };

    let on_edit = {
        let controller = controller.clone();
        use_callback(move |value: String| {
            controller.set_draft(value.clone());
            draft.set(value);
        })
    };

    let on_submit = {
        let controller = controller.clone();
        use_callback(move |()| {
            let controller = controller.clone();
            spawn(async move {
                busy.set(true);
                match controller.submit().await {
                    Ok(_) => error.set(None),
                    Err(err) => error.set(Some(format!("Submit failed: {err}"))),
                }
                snapshot.set(controller.snapshot());
                draft.set(controller.draft());
                busy.set(false);
            });
        })
    };

    let on_advance = {
        let controller = controller.clone();
        use_callback(move |()| {
            controller.advance();
            snapshot.set(controller.snapshot());
        })
    };

    let on_continue = {
        let controller = controller.clone();
        use_callback(move |wants_more: bool| {
            let controller = controller.clone();
            spawn(async move {
                busy.set(true);
                match controller.continue_batch(wants_more).await {
                    Ok(_) => error.set(None),
                    Err(err) => error.set(Some(format!("Continue failed: {err}"))),
                }
                snapshot.set(controller.snapshot());
                draft.set(controller.draft());
                busy.set(false);
            });
        })
    };

    let on_reset = {
        let controller = controller.clone();
        use_callback(move |()| {
            controller.reset();
            snapshot.set(controller.snapshot());
            draft.set(controller.draft());
            error.set(None);
        })
    };

    let on_toggle_theme = use_callback(move |()| {
        let next = theme().toggled();
        theme.set(next);
        let settings = settings.clone();
        // A failed save only costs the preference on next launch.
        spawn(async move {
            let _ = settings.save_theme(next).await;
        });
    });

    // Enter on the feedback screen advances; the answer input is disabled
    // there, so this handler is the only way the key reaches us.
    let on_key = use_callback(move |evt: KeyboardEvent| {
        if evt.key() != Key::Enter || busy() {
            return;
        }
        if snapshot.read().feedback().is_some() {
            evt.prevent_default();
            on_advance.call(());
        }
    });

    let session = snapshot();
    let is_busy = busy();
    let question = session.current_question().cloned();
    let feedback = session.feedback().cloned();
    let summary = session.summary().cloned();
    let session_short = session.session_id().map(|id| id.short().to_string());
    let level_chip = if session.is_idle() {
        "\u{2014}".to_string()
    } else {
        session.level().as_str().to_string()
    };
    let progress = progress_label(&session).unwrap_or_else(|| "Ready".to_string());
    let theme_label = match theme() {
        ThemePreference::Light => "Dark mode",
        ThemePreference::Dark => "Light mode",
    };

    rsx! {
        div { class: "page quiz-page", id: "quiz-root", tabindex: "0", onkeydown: on_key,
            header { class: "quiz-header",
                span { class: "quiz-header__badge", "TA" }
                h1 { class: "quiz-header__title", "Teaching Assistant" }
                span { class: "quiz-header__level", "{level_chip}" }
                button {
                    class: "theme-toggle",
                    id: "theme-toggle",
                    r#type: "button",
                    onclick: move |_| on_toggle_theme.call(()),
                    "{theme_label}"
                }
            }

            if let Some(message) = error() {
                div { class: "banner banner--error", "{message}" }
            }

            div { class: "quiz-progress",
                div { class: "progress-track",
                    div {
                        class: "progress-fill",
                        style: "width: {session.progress_percent()}%",
                    }
                }
                span { class: "progress-label", "{progress}" }
            }

            main { class: "quiz-body",
                if session.is_idle() {
                    StartCard { subject, level, busy: is_busy, on_start }
                } else if let Some(question) = question {
                    QuestionCard {
                        question,
                        session_short,
                        draft,
                        busy: is_busy,
                        locked: feedback.is_some(),
                        on_edit,
                        on_submit,
                    }
                    if let Some(feedback) = feedback {
                        FeedbackPanel { feedback, busy: is_busy, on_advance }
                    }
                } else {
                    CompleteCard { summary, busy: is_busy, on_continue, on_reset }
                }
            }
        }
    }
}

#[component]
fn StartCard(
    subject: Signal<String>,
    level: Signal<Level>,
    busy: bool,
    on_start: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "card start-card",
            h2 { class: "card__title", "Start a quiz" }
            label { class: "field-label", r#for: "subject-input", "Subject" }
            input {
                class: "text-input",
                id: "subject-input",
                r#type: "text",
                placeholder: "e.g. atoms",
                value: "{subject}",
                disabled: busy,
                oninput: move |evt| subject.set(evt.value()),
                onkeydown: move |evt| {
                    if evt.key() == Key::Enter {
                        evt.prevent_default();
                        on_start.call(());
                    }
                },
            }
            label { class: "field-label", r#for: "level-select", "Difficulty" }
            select {
                class: "level-select",
                id: "level-select",
                disabled: busy,
                onchange: move |evt| {
                    if let Ok(parsed) = evt.value().parse::<Level>() {
                        level.set(parsed);
                    }
                },
                for option in Level::ALL {
                    option {
                        value: "{option.as_str()}",
                        selected: option == level(),
                        "{option.as_str()}"
                    }
                }
            }
            button {
                class: "btn btn-primary",
                id: "start-button",
                r#type: "button",
                disabled: busy || subject().trim().is_empty(),
                onclick: move |_| on_start.call(()),
                if busy { "Starting..." } else { "Start" }
            }
        }
    }
}

#[component]
fn QuestionCard(
    question: Question,
    session_short: Option<String>,
    draft: Signal<String>,
    busy: bool,
    locked: bool,
    on_edit: EventHandler<String>,
    on_submit: EventHandler<()>,
) -> Element {
    let placeholder = answer_placeholder(question.answer_type());
    let inputmode = match question.answer_type() {
        AnswerType::Text => "text",
        AnswerType::Numeric => "decimal",
    };

    rsx! {
        div { class: "card question-card",
            if let Some(short) = session_short {
                span { class: "question-card__session", "Session {short}" }
            }
            p { class: "question-card__prompt", "{question.prompt()}" }
            input {
                class: "text-input answer-input",
                id: "answer-input",
                r#type: "text",
                inputmode: "{inputmode}",
                placeholder: "{placeholder}",
                value: "{draft}",
                disabled: busy || locked,
                oninput: move |evt| on_edit.call(evt.value()),
                onkeydown: move |evt| {
                    if evt.key() == Key::Enter {
                        evt.prevent_default();
                        on_submit.call(());
                    }
                },
            }
            if !locked {
                button {
                    class: "btn btn-primary",
                    id: "submit-button",
                    r#type: "button",
                    disabled: busy || draft().trim().is_empty(),
                    onclick: move |_| on_submit.call(()),
                    if busy { "Checking..." } else { "Submit" }
                }
            }
        }
    }
}

#[component]
fn FeedbackPanel(feedback: Feedback, busy: bool, on_advance: EventHandler<()>) -> Element {
    let tone = score_tone(&feedback);
    let score = score_label(&feedback);

    rsx! {
        div { class: "card feedback",
            span { class: "feedback__label", "Score" }
            div { class: "feedback__score {tone}", "{score}" }
            p { class: "feedback__reason", "{feedback.reason()}" }
            details { class: "feedback__reveal", open: true,
                summary { "Correct answer and explanation" }
                p { class: "feedback__correct",
                    strong { "Correct answer: " }
                    "{feedback.correct_answer()}"
                }
                p { class: "feedback__explanation", "{feedback.explanation()}" }
            }
            button {
                class: "btn btn-primary",
                id: "next-button",
                r#type: "button",
                disabled: busy,
                onclick: move |_| on_advance.call(()),
                "Next"
            }
        }
    }
}

#[component]
fn CompleteCard(
    summary: Option<BatchSummary>,
    busy: bool,
    on_continue: EventHandler<bool>,
    on_reset: EventHandler<()>,
) -> Element {
    let vm = summary.as_ref().map(map_summary);

    rsx! {
        div { class: "card complete-card",
            if let Some(vm) = vm {
                h2 { class: "card__title", "Quiz finished" }
                div { class: "summary-tiles",
                    div { class: "summary-tile",
                        span { class: "summary-tile__value", "{vm.answered}" }
                        span { class: "summary-tile__label", "Answered" }
                    }
                    div { class: "summary-tile",
                        span { class: "summary-tile__value", "{vm.points}" }
                        span { class: "summary-tile__label", "Points" }
                    }
                    div { class: "summary-tile",
                        span { class: "summary-tile__value", "{vm.average}" }
                        span { class: "summary-tile__label", "Average" }
                    }
                }
                button {
                    class: "btn btn-primary",
                    id: "start-over-button",
                    r#type: "button",
                    disabled: busy,
                    onclick: move |_| on_reset.call(()),
                    "Start Over"
                }
            } else {
                h2 { class: "card__title", "Batch complete" }
                p { class: "complete-card__subtitle", "Keep going, or finish to see your results." }
                div { class: "complete-card__actions",
                    button {
                        class: "btn btn-primary",
                        id: "continue-button",
                        r#type: "button",
                        disabled: busy,
                        onclick: move |_| on_continue.call(true),
                        "Continue"
                    }
                    button {
                        class: "btn btn-secondary",
                        id: "finish-button",
                        r#type: "button",
                        disabled: busy,
                        onclick: move |_| on_continue.call(false),
                        "Finish"
                    }
                }
            }
        }
    }
}
