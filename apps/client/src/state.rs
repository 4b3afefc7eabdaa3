use std::sync::Arc;
use std::time::Duration;

use crate::access::{is_visible, View};
use crate::api_client::{ApiClient, PortalApi};
use crate::config::Config;
use crate::errors::AppError;
use crate::models::Principal;
use crate::session::{FileStorage, SessionStore};

/// Explicit context handed to every view in place of process-wide globals.
pub struct AppContext {
    pub config: Config,
    pub session: SessionStore,
    /// Pluggable remote API. Default: [`ApiClient`]; tests swap in a fake.
    pub api: Arc<dyn PortalApi>,
}

impl AppContext {
    /// Restores the persisted session and builds the HTTP client. No network traffic.
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let api = ApiClient::new(
            &config.api_base_url,
            Duration::from_secs(config.http_timeout_secs),
        )?;
        let session =
            SessionStore::restore(Box::new(FileStorage::new(config.session_file.clone())));

        Ok(Self {
            config,
            session,
            api: Arc::new(api),
        })
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.session.current()
    }

    pub fn can_open(&self, view: View) -> bool {
        is_visible(view, self.principal())
    }
}
