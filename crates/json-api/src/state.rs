//! State

use verdant_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    /// Static token gating the administrative endpoints.
    pub(crate) admin_token: String,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, admin_token: String) -> Self {
        Self { app, admin_token }
    }
}
