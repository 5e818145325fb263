use std::sync::Arc;

pub mod config;
pub mod modules;
pub mod services;

use config::api::ApiConfig;
use modules::auth::crud::SessionStore;
use services::api::ApiClient;
use services::sanitizer::Sanitizer;
use services::session_guard::SessionGuard;

#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub api: ApiClient,
    pub guard: SessionGuard,
    pub sanitizer: Arc<Sanitizer>,
}

impl AppState {
    pub fn new(
        config: ApiConfig,
        sessions: Arc<dyn SessionStore>,
    ) -> Result<Self, services::sanitizer::SanitizerError> {
        let sanitizer = Sanitizer::new(&config.product_image_prefix)?;
        let api = ApiClient::new(&config, sessions);
        let guard = SessionGuard::new(api.clone(), config.session_check_timeout);

        Ok(Self {
            config,
            api,
            guard,
            sanitizer: Arc::new(sanitizer),
        })
    }

    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        self.api.sessions()
    }
}
