//! In-memory doubles for driving step views in tests.

use crate::api::error::ApiError;
use crate::api::source::RunSource;
use crate::view::scheduler::{Scheduler, Tick};
use crate::view::sink::ViewSink;
use futures::channel::oneshot;
use futures::executor::block_on;
use shared::types::log_chunk::{LogChunk, LogCursor};
use shared::types::step::{Step, StepStatus};
use shared::types::step_key::StepKey;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, VecDeque};
use std::rc::Rc;
use std::time::Duration;

/// In-memory run service. `None` in the status script fails that call.
#[derive(Default)]
pub(crate) struct FakeRunService {
    pub(crate) statuses: RefCell<VecDeque<Option<StepStatus>>>,
    pub(crate) log: RefCell<String>,
    pub(crate) fail_log: Cell<bool>,
    pub(crate) gate: RefCell<Option<oneshot::Receiver<()>>>,
    pub(crate) step_calls: Cell<usize>,
    pub(crate) chunk_cursors: RefCell<Vec<Option<String>>>,
}

impl FakeRunService {
    pub(crate) fn with_statuses(statuses: &[Option<StepStatus>]) -> Rc<Self> {
        let service = Self::default();
        service.statuses.borrow_mut().extend(statuses.iter().copied());
        Rc::new(service)
    }

    pub(crate) fn write_log(&self, text: &str) {
        self.log.borrow_mut().push_str(text);
    }

    /// Holds the next `get_step` call until the returned sender fires.
    pub(crate) fn hold_next_step(&self) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        *self.gate.borrow_mut() = Some(gate);
        release
    }

    pub(crate) fn chunk_calls(&self) -> usize {
        self.chunk_cursors.borrow().len()
    }
}

impl RunSource for FakeRunService {
    async fn get_step(&self, key: &StepKey) -> Result<Step, ApiError> {
        self.step_calls.set(self.step_calls.get() + 1);
        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        let next = {
            let mut statuses = self.statuses.borrow_mut();
            if statuses.len() > 1 {
                statuses.pop_front().flatten()
            } else {
                statuses.front().copied().flatten()
            }
        };
        match next {
            Some(status) => Ok(Step {
                index: key.step_index,
                name: "build".into(),
                status,
            }),
            None => Err(ApiError::Status {
                url: "/step".into(),
                status: 503,
            }),
        }
    }

    async fn get_log_chunk(
        &self,
        _key: &StepKey,
        cursor: Option<&LogCursor>,
        limit: usize,
    ) -> Result<LogChunk, ApiError> {
        self.chunk_cursors
            .borrow_mut()
            .push(cursor.map(|c| c.as_str().to_string()));
        if self.fail_log.get() {
            return Err(ApiError::Status {
                url: "/log_chunk".into(),
                status: 500,
            });
        }

        let log = self.log.borrow();
        let start = cursor
            .and_then(|c| c.as_str().parse::<usize>().ok())
            .unwrap_or(0)
            .min(log.len());
        let end = (start + limit).min(log.len());
        Ok(LogChunk {
            text: log[start..end].to_string(),
            cursor: LogCursor::new(end.to_string()),
        })
    }
}

#[derive(Debug, Default)]
struct Rendered {
    classes: BTreeSet<String>,
    status_text: String,
    log_text: String,
    writes: usize,
    appends: usize,
}

#[derive(Clone, Default)]
pub(crate) struct RecordingSink(Rc<RefCell<Rendered>>);

impl RecordingSink {
    pub(crate) fn classes(&self) -> Vec<String> {
        self.0.borrow().classes.iter().cloned().collect()
    }

    pub(crate) fn status_text(&self) -> String {
        self.0.borrow().status_text.clone()
    }

    pub(crate) fn log_text(&self) -> String {
        self.0.borrow().log_text.clone()
    }

    pub(crate) fn writes(&self) -> usize {
        self.0.borrow().writes
    }

    pub(crate) fn appends(&self) -> usize {
        self.0.borrow().appends
    }
}

impl ViewSink for RecordingSink {
    fn set_status_class(&self, previous: Option<StepStatus>, current: StepStatus) {
        let mut rendered = self.0.borrow_mut();
        if let Some(previous) = previous {
            rendered.classes.remove(previous.as_str());
        }
        rendered.classes.insert(current.as_str().to_string());
        rendered.writes += 1;
    }

    fn set_status_text(&self, text: &str) {
        let mut rendered = self.0.borrow_mut();
        rendered.status_text = text.to_string();
        rendered.writes += 1;
    }

    fn append_log_text(&self, text: &str) {
        let mut rendered = self.0.borrow_mut();
        rendered.log_text.push_str(text);
        rendered.writes += 1;
        rendered.appends += 1;
    }
}

/// Scheduler whose ticks are fired by the test.
#[derive(Clone, Default)]
pub(crate) struct ManualScheduler {
    tick: Rc<RefCell<Option<Tick>>>,
    pub(crate) scheduled: Rc<Cell<usize>>,
    pub(crate) period: Rc<Cell<Option<Duration>>>,
}

pub(crate) struct ManualTimer(Rc<RefCell<Option<Tick>>>);

impl Drop for ManualTimer {
    fn drop(&mut self) {
        self.0.borrow_mut().take();
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualTimer;

    fn every(&self, period: Duration, tick: Tick) -> ManualTimer {
        self.scheduled.set(self.scheduled.get() + 1);
        self.period.set(Some(period));
        *self.tick.borrow_mut() = Some(tick);
        ManualTimer(self.tick.clone())
    }
}

impl ManualScheduler {
    /// Runs one tick to completion; false when no timer is active.
    pub(crate) fn fire(&self) -> bool {
        let tick = self.tick.borrow().clone();
        match tick {
            Some(tick) => {
                block_on(tick());
                true
            }
            None => false,
        }
    }
}
