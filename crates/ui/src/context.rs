use std::sync::Arc;

use credit_core::model::SessionId;
use services::{AppServices, ForecastService, KnowledgeService, ProgressService};

/// What the desktop shell needs from the composition root.
pub trait UiApp: Send + Sync {
    fn services(&self) -> Arc<AppServices>;
    /// Backend base URL, shown in the sidebar.
    fn api_base_url(&self) -> String;
}

#[derive(Clone)]
pub struct AppContext {
    services: Arc<AppServices>,
    api_base_url: String,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            services: app.services(),
            api_base_url: app.api_base_url(),
        }
    }

    #[must_use]
    pub fn services(&self) -> Arc<AppServices> {
        Arc::clone(&self.services)
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.services.session_id().clone()
    }

    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    #[must_use]
    pub fn progress(&self) -> ProgressService {
        self.services.progress().clone()
    }

    #[must_use]
    pub fn forecast(&self) -> ForecastService {
        self.services.forecast().clone()
    }

    #[must_use]
    pub fn knowledge(&self) -> KnowledgeService {
        self.services.knowledge().clone()
    }
}

// Provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
