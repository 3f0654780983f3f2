use futures_util::future::LocalBoxFuture;
use gloo::timers::callback::Interval;
use leptos::task::spawn_local;
use std::rc::Rc;
use std::time::Duration;

/// Produces the future run on every timer tick.
pub type Tick = Rc<dyn Fn() -> LocalBoxFuture<'static, ()>>;

/// Repeating timer on the page's event loop.
pub trait Scheduler {
    /// Cancels the timer when dropped.
    type Handle;

    fn every(&self, period: Duration, tick: Tick) -> Self::Handle;
}

/// `setInterval` backed scheduler; each tick is spawned as a local task.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Handle = Interval;

    fn every(&self, period: Duration, tick: Tick) -> Interval {
        let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        Interval::new(millis, move || spawn_local(tick()))
    }
}
