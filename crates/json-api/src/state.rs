//! State

use std::sync::Arc;

use carte_app::context::{AppContext, AppSettings};

/// Shared handler state, injected into every request's depot.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
}

impl State {
    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self { app })
    }

    pub(crate) fn settings(&self) -> &AppSettings {
        &self.app.settings
    }
}
