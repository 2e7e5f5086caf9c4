use std::{fmt, sync::Arc};

use roster_core::MemberService;

use crate::config::Config;

/// Shared handler state; cheap to clone, nothing mutable at this layer.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<MemberService>,
    pub config: Arc<Config>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
