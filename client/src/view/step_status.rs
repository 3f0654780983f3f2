//! Polls the status and log of one step until the step completes.
//!
//! A [`StepStatusView`] is shared as an `Rc`: the repeating timer only holds a
//! weak reference, so dropping the last strong reference also drops the timer
//! handle and ends polling. Cycles never overlap: a tick that fires while the
//! previous cycle is still awaiting the service returns immediately.

use crate::api::error::ApiError;
use crate::api::source::RunSource;
use crate::config::ViewConfig;
use crate::view::scheduler::{Scheduler, Tick};
use crate::view::sink::ViewSink;
use futures_util::FutureExt;
use shared::types::log_chunk::LogCursor;
use shared::types::step::StepStatus;
use shared::types::step_key::StepKey;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, error};

#[derive(Debug, Default)]
struct StepState {
    status: Option<StepStatus>,
    cursor: Option<LogCursor>,
}

/// Clears the in-progress flag however the cycle ends.
struct RefreshGuard<'a>(&'a Cell<bool>);

impl<'a> RefreshGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

pub struct StepStatusView<S, V, C: Scheduler> {
    source: S,
    key: StepKey,
    sink: V,
    scheduler: C,
    config: ViewConfig,
    state: RefCell<StepState>,
    refreshing: Cell<bool>,
    timer: RefCell<Option<C::Handle>>,
}

impl<S, V, C> StepStatusView<S, V, C>
where
    S: RunSource,
    V: ViewSink,
    C: Scheduler,
{
    pub fn new(source: S, key: StepKey, sink: V, scheduler: C, config: ViewConfig) -> Self {
        Self {
            source,
            key,
            sink,
            scheduler,
            config,
            state: RefCell::new(StepState::default()),
            refreshing: Cell::new(false),
            timer: RefCell::new(None),
        }
    }

    /// Status and cursor the page was rendered with.
    pub fn with_initial_state(self, status: Option<StepStatus>, cursor: Option<LogCursor>) -> Self {
        *self.state.borrow_mut() = StepState { status, cursor };
        self
    }

    pub fn key(&self) -> &StepKey {
        &self.key
    }

    pub fn status(&self) -> Option<StepStatus> {
        self.state.borrow().status
    }

    pub fn cursor(&self) -> Option<LogCursor> {
        self.state.borrow().cursor.clone()
    }

    pub fn is_completed(&self) -> bool {
        self.status().is_some_and(|status| status.is_completed())
    }

    pub fn is_polling(&self) -> bool {
        self.timer.borrow().is_some()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing.get()
    }

    /// Schedules [`refresh`](Self::refresh) on the configured interval.
    /// Does nothing if a timer is already running. Callers check
    /// [`is_completed`](Self::is_completed) first; a timer started on a
    /// completed step stops itself on its first tick without fetching.
    pub fn start_polling(self: &Rc<Self>)
    where
        S: 'static,
        V: 'static,
        C: 'static,
        C::Handle: 'static,
    {
        if self.is_polling() {
            return;
        }

        let view = Rc::downgrade(self);
        let tick: Tick = Rc::new(move || {
            let view = view.clone();
            async move {
                if let Some(view) = view.upgrade() {
                    view.refresh().await;
                }
            }
            .boxed_local()
        });
        let handle = self.scheduler.every(self.config.refresh_interval(), tick);
        *self.timer.borrow_mut() = Some(handle);
        debug!(step = %self.key, "polling started");
    }

    pub fn stop_polling(&self) {
        let handle = self.timer.borrow_mut().take();
        if handle.is_some() {
            debug!(step = %self.key, "polling stopped");
        }
    }

    /// Runs one status + log cycle. Any failure is logged and stops polling;
    /// whatever the cycle already rendered stays on the page.
    pub async fn refresh(&self) {
        if self.refreshing.get() {
            return;
        }
        if self.is_completed() {
            self.stop_polling();
            return;
        }
        let _guard = RefreshGuard::enter(&self.refreshing);

        match self.refresh_cycle().await {
            Ok(()) => {
                if self.is_completed() {
                    self.stop_polling();
                }
            }
            Err(err) => {
                error!(step = %self.key, "refresh failed: {}", err);
                self.stop_polling();
            }
        }
    }

    async fn refresh_cycle(&self) -> Result<(), ApiError> {
        self.refresh_status().await?;
        self.refresh_log().await
    }

    async fn refresh_status(&self) -> Result<(), ApiError> {
        let step = self.source.get_step(&self.key).await?;

        let previous = {
            let mut state = self.state.borrow_mut();
            if state.status == Some(step.status) {
                return Ok(());
            }
            state.status.replace(step.status)
        };
        self.sink.set_status_class(previous, step.status);
        self.sink.set_status_text(step.status.as_str());
        Ok(())
    }

    /// Reads chunks until one comes back shorter than the chunk size, which
    /// means the live end of the log has been reached.
    async fn refresh_log(&self) -> Result<(), ApiError> {
        let limit = self.config.log_chunk_size();
        loop {
            let cursor = self.state.borrow().cursor.clone();
            let chunk = self
                .source
                .get_log_chunk(&self.key, cursor.as_ref(), limit)
                .await?;
            debug!(step = %self.key, bytes = chunk.text.len(), "log chunk");

            if !chunk.text.is_empty() {
                self.sink.append_log_text(&chunk.text);
            }
            let caught_up = chunk.text.len() != limit;
            self.state.borrow_mut().cursor = Some(chunk.cursor);
            if caught_up {
                return Ok(());
            }
        }
    }
}
