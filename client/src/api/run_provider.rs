use crate::api::error::ApiError;
use crate::api::source::RunSource;
use gloo_net::http::Request;
use once_cell::sync::OnceCell;
use shared::routes;
use shared::types::log_chunk::{LogChunk, LogCursor};
use shared::types::step::Step;
use shared::types::step_key::StepKey;
use std::sync::Arc;
use tracing::warn;

static INSTANCE: OnceCell<Arc<RunProvider>> = OnceCell::new();

/// HTTP client for the run service, usually reached through the website's
/// `/service_proxy`.
#[derive(Debug, Clone)]
pub struct RunProvider {
    base_url: String,
}

impl RunProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Provider for the service proxy of the page's own origin.
    pub fn from_window() -> Option<Self> {
        let origin = web_sys::window()?.location().origin().ok()?;
        Some(Self::new(format!("{}/service_proxy", origin)))
    }

    /// Installs the shared provider. Only the first call takes effect; a later
    /// one is logged and returns false.
    pub fn init(provider: RunProvider) -> bool {
        match INSTANCE.set(Arc::new(provider)) {
            Ok(()) => true,
            Err(rejected) => {
                warn!(
                    ignored = %rejected.base_url,
                    current = INSTANCE.get().map(|p| p.base_url.as_str()).unwrap_or_default(),
                    "run provider already initialized"
                );
                false
            }
        }
    }

    pub fn instance() -> Option<Arc<Self>> {
        INSTANCE.get().cloned()
    }
}

impl RunSource for RunProvider {
    async fn get_step(&self, key: &StepKey) -> Result<Step, ApiError> {
        let url = routes::step(&self.base_url, key);
        let resp = Request::get(&url).send().await?;
        if !resp.ok() {
            return Err(ApiError::Status {
                url,
                status: resp.status(),
            });
        }
        Ok(resp.json::<Step>().await?)
    }

    async fn get_log_chunk(
        &self,
        key: &StepKey,
        cursor: Option<&LogCursor>,
        limit: usize,
    ) -> Result<LogChunk, ApiError> {
        let url = routes::step_log_chunk(&self.base_url, key);
        let limit = limit.to_string();
        let mut params = vec![("limit", limit.as_str())];
        if let Some(cursor) = cursor {
            params.push(("cursor", cursor.as_str()));
        }

        let resp = Request::get(&url).query(params).send().await?;
        if !resp.ok() {
            return Err(ApiError::Status {
                url,
                status: resp.status(),
            });
        }
        let Some(cursor) = resp.headers().get(routes::LOG_CURSOR_HEADER) else {
            return Err(ApiError::MissingCursor { url });
        };
        let text = resp.text().await?;
        Ok(LogChunk {
            text,
            cursor: LogCursor::new(cursor),
        })
    }
}
