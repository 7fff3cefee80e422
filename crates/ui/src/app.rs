use dioxus::prelude::*;

use quiz_core::model::ThemePreference;

use crate::context::AppContext;
use crate::views::QuizView;

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();

    // Theme lives at the root so the class wraps every view; the toggle in
    // the header writes this signal and persists through SettingsService.
    let mut theme = use_context_provider(|| Signal::new(ThemePreference::default()));

    let settings = ctx.settings();
    let _restore = use_resource(move || {
        let settings = settings.clone();
        async move {
            if let Ok(saved) = settings.load_theme().await {
                theme.set(saved);
            }
        }
    });

    let theme_class = match theme() {
        ThemePreference::Light => "theme-light",
        ThemePreference::Dark => "theme-dark",
    };

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        // Stable OS/window title; the quiz renders its own headings.
        document::Title { "Teaching Assistant" }

        div { class: "app-root {theme_class}",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                QuizView {}
            }
        }
    }
}
