use leptos::prelude::*;
use shared::types::step::StepStatus;
use tracing::warn;
use web_sys::{Document, Element};

/// Where a step view renders what it polls.
pub trait ViewSink {
    /// Swaps the status class: `previous` is removed before `current` is added.
    fn set_status_class(&self, previous: Option<StepStatus>, current: StepStatus);

    fn set_status_text(&self, text: &str);

    fn append_log_text(&self, text: &str);
}

/// Elements of a server-rendered step page.
pub struct DomSink {
    status_indicator: Element,
    status_text: Element,
    log_text: Element,
}

impl DomSink {
    pub const STATUS_INDICATOR_CLASS: &'static str = "status-indicator";
    pub const STATUS_TEXT_CLASS: &'static str = "status-text";
    pub const LOG_TEXT_ID: &'static str = "log-text";

    pub fn new(status_indicator: Element, status_text: Element, log_text: Element) -> Self {
        Self {
            status_indicator,
            status_text,
            log_text,
        }
    }

    /// Looks up `.status-indicator`, `.status-text` and `#log-text`. Returns
    /// the selector of the first element that is missing.
    pub fn find(document: &Document) -> Result<Self, String> {
        let by_class = |name: &str| {
            document
                .get_elements_by_class_name(name)
                .item(0)
                .ok_or_else(|| format!(".{}", name))
        };
        let status_indicator = by_class(Self::STATUS_INDICATOR_CLASS)?;
        let status_text = by_class(Self::STATUS_TEXT_CLASS)?;
        let log_text = document
            .get_element_by_id(Self::LOG_TEXT_ID)
            .ok_or_else(|| format!("#{}", Self::LOG_TEXT_ID))?;
        Ok(Self::new(status_indicator, status_text, log_text))
    }
}

impl ViewSink for DomSink {
    fn set_status_class(&self, previous: Option<StepStatus>, current: StepStatus) {
        let classes = self.status_indicator.class_list();
        if let Some(previous) = previous {
            if let Err(err) = classes.remove_1(previous.as_str()) {
                warn!(?err, "failed to remove status class");
            }
        }
        if let Err(err) = classes.add_1(current.as_str()) {
            warn!(?err, "failed to add status class");
        }
    }

    fn set_status_text(&self, text: &str) {
        self.status_text.set_text_content(Some(text));
    }

    fn append_log_text(&self, text: &str) {
        // a new text node avoids re-serializing the whole log
        if let Err(err) = self.log_text.append_with_str_1(text) {
            warn!(?err, "failed to append log text");
        }
    }
}

/// Reactive state for the leptos step page.
#[derive(Debug, Clone, Copy)]
pub struct SignalSink {
    status_class: RwSignal<Option<StepStatus>>,
    status_text: RwSignal<String>,
    log_text: RwSignal<String>,
}

impl SignalSink {
    pub fn new() -> Self {
        Self {
            status_class: RwSignal::new(None),
            status_text: RwSignal::new(String::new()),
            log_text: RwSignal::new(String::new()),
        }
    }

    pub fn status_class(&self) -> RwSignal<Option<StepStatus>> {
        self.status_class
    }

    pub fn status_text(&self) -> RwSignal<String> {
        self.status_text
    }

    pub fn log_text(&self) -> RwSignal<String> {
        self.log_text
    }
}

impl Default for SignalSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewSink for SignalSink {
    fn set_status_class(&self, _previous: Option<StepStatus>, current: StepStatus) {
        self.status_class.set(Some(current));
    }

    fn set_status_text(&self, text: &str) {
        self.status_text.set(text.to_string());
    }

    fn append_log_text(&self, text: &str) {
        self.log_text.update(|log| log.push_str(text));
    }
}
