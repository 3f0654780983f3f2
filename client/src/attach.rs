//! Attaches a step view to a step page rendered by the website.

use crate::api::run_provider::RunProvider;
use crate::config::ViewConfig;
use crate::view::scheduler::BrowserScheduler;
use crate::view::sink::DomSink;
use crate::view::step_status::StepStatusView;
use shared::types::view_data::StepViewData;
use std::rc::Rc;
use thiserror::Error;
use tracing::info;
use wasm_bindgen::prelude::*;

pub type DomStepView = StepStatusView<RunProvider, DomSink, BrowserScheduler>;

#[derive(Debug, Error)]
pub enum AttachError {
    #[error("invalid step view data: {0}")]
    ViewData(#[from] serde_json::Error),

    #[error("no browser window or document")]
    NoWindow,

    #[error("page has no element matching {0}")]
    MissingElement(String),
}

/// Keeps an attached view alive for as long as the page holds on to it.
#[wasm_bindgen]
pub struct StepViewHandle {
    view: Rc<DomStepView>,
}

#[wasm_bindgen]
impl StepViewHandle {
    /// Restarts polling. On a completed step the first tick stops the timer
    /// again without fetching.
    #[wasm_bindgen(js_name = startPolling)]
    pub fn start_polling(&self) {
        self.view.start_polling();
    }

    #[wasm_bindgen(js_name = stopPolling)]
    pub fn stop_polling(&self) {
        self.view.stop_polling();
    }

    #[wasm_bindgen(js_name = isPolling)]
    pub fn is_polling(&self) -> bool {
        self.view.is_polling()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> Option<String> {
        self.view.status().map(|status| status.to_string())
    }
}

/// Builds a view over the page elements and starts polling unless the page
/// was rendered for a completed step.
pub fn attach(data: StepViewData) -> Result<StepViewHandle, AttachError> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or(AttachError::NoWindow)?;
    let sink = DomSink::find(&document).map_err(AttachError::MissingElement)?;
    let provider = match data.service_url.as_deref() {
        Some(url) => RunProvider::new(url),
        None => RunProvider::from_window().ok_or(AttachError::NoWindow)?,
    };

    let key = data.step_key();
    let view = StepStatusView::new(provider, key, sink, BrowserScheduler, ViewConfig::default())
        .with_initial_state(data.step_status, data.log_cursor);
    let view = Rc::new(view);
    if !view.is_completed() {
        view.start_polling();
    }
    info!(step = %view.key(), polling = view.is_polling(), "step view attached");

    Ok(StepViewHandle { view })
}

pub fn attach_json(view_data_json: &str) -> Result<StepViewHandle, AttachError> {
    attach(StepViewData::from_json(view_data_json)?)
}
