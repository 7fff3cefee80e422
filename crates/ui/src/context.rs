use std::sync::Arc;

use services::{SessionController, SettingsService};

pub trait UiApp: Send + Sync {
    fn session(&self) -> SessionController;
    fn settings(&self) -> Arc<SettingsService>;
}

#[derive(Clone)]
pub struct AppContext {
    session: SessionController,
    settings: Arc<SettingsService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            session: app.session(),
            settings: app.settings(),
        }
    }

    #[must_use]
    pub fn session(&self) -> SessionController {
        self.session.clone()
    }

    #[must_use]
    pub fn settings(&self) -> Arc<SettingsService> {
        Arc::clone(&self.settings)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
