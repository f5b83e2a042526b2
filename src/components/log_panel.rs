//! Diagnostics Panel Component
//!
//! Recent log lines captured by the console logger.

use leptos::prelude::*;

#[component]
pub fn LogPanel(open: RwSignal<bool>) -> impl IntoView {
    // snapshot taken each time the panel opens
    let lines = Memo::new(move |_| {
        if open.get() {
            console_logger::recent_lines()
        } else {
            Vec::new()
        }
    });

    view! {
        <Show when=move || open.get()>
            <aside class="log-panel">
                <header>
                    <h2>"Log"</h2>
                    <button class="close-btn" on:click=move |_| open.set(false)>"×"</button>
                </header>
                <pre class="log-lines">
                    {move || lines.get().join("\n")}
                </pre>
            </aside>
        </Show>
    }
}
