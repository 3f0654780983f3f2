pub mod api;
pub mod attach;
pub mod config;
pub mod logging;
pub mod ui;
pub mod view;

use crate::api::run_provider::RunProvider;
use crate::attach::StepViewHandle;
use crate::ui::step_page::StepPage;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use wasm_bindgen::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <main>
                <Routes fallback=|| view! { <p>"Step not found."</p> }>
                    <Route path=path!("/project/:project/run/:run/step/:index") view=StepPage/>
                </Routes>
            </main>
        </Router>
    }
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logging::init();
}

/// Mounts the single-page step viewer. Without `service_url` the page's own
/// `/service_proxy` is used.
#[wasm_bindgen]
pub fn mount_app(service_url: Option<String>) {
    match service_url.map(RunProvider::new).or_else(RunProvider::from_window) {
        Some(provider) => {
            RunProvider::init(provider);
        }
        None => tracing::error!("no run service url and no window origin"),
    }
    leptos::mount::mount_to_body(|| view! { <App/> });
}

/// Entry point for the server-rendered step page: takes the page's view data
/// as JSON and polls until the step completes.
#[wasm_bindgen(js_name = attachStepView)]
pub fn attach_step_view(view_data_json: &str) -> Result<StepViewHandle, String> {
    attach::attach_json(view_data_json).map_err(|err| err.to_string())
}
