use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;

use services::{QuestionService, SessionController, SettingsService};
use storage::repository::InMemoryRepository;

use crate::app::App;
use crate::context::{UiApp, build_app_context};

struct TestApp {
    controller: SessionController,
    settings: Arc<SettingsService>,
}

impl UiApp for TestApp {
    fn session(&self) -> SessionController {
        self.controller.clone()
    }

    fn settings(&self) -> Arc<SettingsService> {
        Arc::clone(&self.settings)
    }
}

#[derive(Props, Clone)]
struct HarnessProps {
    app: Arc<TestApp>,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for HarnessProps {}

#[component]
fn Harness(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { App {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub controller: SessionController,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Mount the app against a scripted service and in-memory settings. Session
/// state is driven through the returned controller; a `rebuild` afterwards
/// makes the view pick it up.
pub fn setup_view_harness(service: Arc<dyn QuestionService>) -> ViewHarness {
    let controller = SessionController::new(service);
    let settings = Arc::new(SettingsService::new(Arc::new(InMemoryRepository::new())));
    let app = Arc::new(TestApp {
        controller: controller.clone(),
        settings,
    });

    let dom = VirtualDom::new_with_props(Harness, HarnessProps { app });

    ViewHarness { dom, controller }
}
