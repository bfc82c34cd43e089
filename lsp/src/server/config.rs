use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use pbls_core::settings::{Settings, SECTION};
use serde_json::Value;
use tower_lsp::lsp_types::{ConfigurationItem, Url};
use tracing::debug;

use super::error::ServerError;
use super::state::PbLanguageServer;

/// Per-document settings, fetched once and memoised until the document closes or the
/// configuration changes. Clients without `workspace/configuration` share one global
/// entry taken from `didChangeConfiguration`.
#[derive(Debug)]
pub struct ClientSettings {
    workspace_configuration: AtomicBool,
    cache: DashMap<Url, Arc<Settings>>,
    global: Mutex<Arc<Settings>>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            workspace_configuration: AtomicBool::new(false),
            cache: DashMap::new(),
            global: Mutex::new(Arc::new(Settings::default())),
        }
    }
}

impl ClientSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_workspace_configuration(&self, supported: bool) {
        self.workspace_configuration.store(supported, Ordering::Relaxed);
    }

    pub fn has_workspace_configuration(&self) -> bool {
        self.workspace_configuration.load(Ordering::Relaxed)
    }

    /// Returns the memoised settings for `uri`, calling `fetch` for the raw section on a miss.
    pub async fn load<F, Fut>(&self, uri: &Url, fetch: F) -> Result<Arc<Settings>, ServerError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, ServerError>>,
    {
        if !self.has_workspace_configuration() {
            return Ok(self.global());
        }
        if let Some(settings) = self.cache.get(uri) {
            return Ok(settings.clone());
        }
        let settings = Arc::new(Settings::from_json(fetch().await?)?);
        debug!(%uri, "settings loaded");
        self.cache.insert(uri.clone(), settings.clone());
        Ok(settings)
    }

    pub fn evict(&self, uri: &Url) {
        self.cache.remove(uri);
    }

    /// Drops every memoised entry. Without workspace configuration the new global
    /// settings are read from the notification payload.
    pub fn reset(&self, payload: &Value) -> Result<(), ServerError> {
        self.cache.clear();
        if self.has_workspace_configuration() {
            return Ok(());
        }
        let section = payload.get(SECTION).cloned().unwrap_or(Value::Null);
        let settings = Arc::new(Settings::from_json(section)?);
        match self.global.lock() {
            Ok(mut global) => *global = settings,
            Err(poisoned) => *poisoned.into_inner() = settings,
        }
        Ok(())
    }

    fn global(&self) -> Arc<Settings> {
        match self.global.lock() {
            Ok(global) => global.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl PbLanguageServer {
    async fn fetch_settings(&self, uri: &Url) -> Result<Value, ServerError> {
        let items = vec![ConfigurationItem {
            scope_uri: Some(uri.clone()),
            section: Some(SECTION.to_string()),
        }];
        let values = self
            .client
            .configuration(items)
            .await
            .map_err(|e| ServerError::Settings(e.to_string()))?;
        Ok(values.into_iter().next().unwrap_or(Value::Null))
    }

    pub(crate) async fn load_settings(&self, uri: &Url) -> Result<Arc<Settings>, ServerError> {
        self.settings.load(uri, move || self.fetch_settings(uri)).await
    }
}
