use leptos::prelude::*;

#[component]
pub fn LogText(text: Signal<String>) -> impl IntoView {
    view! {
        <pre
            id="log-text"
            style="flex:1; margin:0; background:#0b1020; color:#e5e7eb; font-family: ui-monospace, SFMono-Regular, Menlo, Monaco, Consolas, Liberation Mono, monospace; font-size:12px; padding:8px; overflow:auto; white-space:pre-wrap;"
        >
            {move || text.get()}
        </pre>
    }
}
