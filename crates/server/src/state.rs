use std::sync::Arc;

use service::luggage::{LuggageService, LuggageStore};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub luggage: Arc<LuggageService<dyn LuggageStore>>,
    /// `None` disables the admin routes.
    pub admin_api_key: Option<Arc<str>>,
}

impl AppState {
    pub fn new(luggage: Arc<LuggageService<dyn LuggageStore>>, admin_api_key: Option<String>) -> Self {
        Self { luggage, admin_api_key: admin_api_key.map(Arc::from) }
    }
}
