use crate::api::run_provider::RunProvider;
use crate::api::source::RunSource;
use crate::config::ViewConfig;
use crate::ui::log_text::LogText;
use crate::view::scheduler::BrowserScheduler;
use crate::view::sink::SignalSink;
use crate::view::step_status::StepStatusView;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use shared::types::step::StepStatus;
use shared::types::step_key::StepKey;
use std::rc::Rc;
use std::sync::Arc;

type SignalStepView<S> = StepStatusView<S, SignalSink, BrowserScheduler>;

fn status_color(status: Option<StepStatus>) -> &'static str {
    match status {
        Some(StepStatus::Succeeded) => "#16a34a",
        Some(StepStatus::Failed) | Some(StepStatus::Exception) => "#dc2626",
        Some(StepStatus::Aborted) | Some(StepStatus::Cancelled) => "#9333ea",
        Some(StepStatus::Running) => "#2563eb",
        Some(StepStatus::Skipped) => "#6b7280",
        Some(StepStatus::Pending) | Some(StepStatus::Unknown) | None => "#d1d5db",
    }
}

/// Each step gets a sink of its own: a cycle still in flight for a step the
/// page has navigated away from only ever writes to that step's sink.
fn open_step<S: RunSource>(source: S, key: StepKey) -> (Rc<SignalStepView<S>>, SignalSink) {
    let sink = SignalSink::new();
    let view = StepStatusView::new(source, key, sink, BrowserScheduler, ViewConfig::default());
    (Rc::new(view), sink)
}

#[component]
pub fn StepPage() -> impl IntoView {
    let params = use_params_map();
    let step_key = move || {
        let params = params.get();
        let index = params.get("index").and_then(|v| v.parse::<u32>().ok())?;
        Some(StepKey::new(params.get("project")?, params.get("run")?, index))
    };

    let current = RwSignal::new(None::<SignalSink>);
    let (error_msg, set_error_msg) = signal::<Option<String>>(None);
    // owning the view here ties its timer to the page
    let poller = StoredValue::new_local(None::<Rc<SignalStepView<Arc<RunProvider>>>>);

    Effect::new(move |_| {
        poller.set_value(None);
        current.set(None);

        let Some(key) = step_key() else {
            set_error_msg.set(Some("invalid step address".into()));
            return;
        };
        let Some(provider) = RunProvider::instance() else {
            set_error_msg.set(Some("run service is not configured".into()));
            return;
        };
        set_error_msg.set(None);

        let (view, sink) = open_step(provider, key);
        current.set(Some(sink));
        poller.set_value(Some(view.clone()));
        view.start_polling();
        spawn_local(async move { view.refresh().await });
    });

    // sinks of earlier steps are disposed with the effect run that made them
    let status_class = move || {
        current
            .get()
            .and_then(|sink| sink.status_class().try_get().flatten())
    };
    let status_text = move || {
        current
            .get()
            .and_then(|sink| sink.status_text().try_get())
            .unwrap_or_default()
    };
    let log_text = Signal::derive(move || {
        current
            .get()
            .and_then(|sink| sink.log_text().try_get())
            .unwrap_or_default()
    });

    view! {
        <div style="font-family: system-ui, -apple-system, Segoe UI, Roboto, Ubuntu, Cantarell, Noto Sans, Helvetica, Arial, Apple Color Emoji, Segoe UI Emoji; padding:16px; display:flex; flex-direction:column; gap:12px; height:100vh; box-sizing:border-box;">
            {move || {
                error_msg
                    .get()
                    .map(|err| {
                        view! {
                            <div style="padding:16px; color:#842029; background:#f8d7da; border:1px solid #f5c2c7; border-radius:6px;">
                                <strong>{"Error: "}</strong>
                                {err}
                            </div>
                        }
                    })
            }}
            <div style="display:flex; align-items:center; gap:8px;">
                <span
                    class=move || {
                        match status_class() {
                            Some(status) => format!("status-indicator {}", status),
                            None => "status-indicator".to_string(),
                        }
                    }
                    style=move || {
                        format!(
                            "display:inline-block; width:12px; height:12px; border-radius:50%; background:{};",
                            status_color(status_class()),
                        )
                    }
                ></span>
                <span class="status-text" style="color:#374151; font-weight:600;">
                    {status_text}
                </span>
            </div>
            <LogText text=log_text/>
        </div>
    }
}
