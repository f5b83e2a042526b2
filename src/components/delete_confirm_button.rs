//! Delete Confirm Button Component
//!
//! Inline row delete with a confirm/cancel step.

use leptos::prelude::*;

/// Inline delete confirmation button
///
/// Shows a × button initially. When clicked, shows "Hapus?" with ✓/✗ buttons.
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (confirm_delete, set_confirm_delete) = signal(false);

    view! {
        <Show
            when=move || confirm_delete.get()
            fallback=move || view! {
                <button
                    class="delete-btn"
                    title="Hapus"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirm_delete.set(true);
                    }
                >
                    "×"
                </button>
            }
        >
            <span class="delete-confirm">
                <span class="delete-confirm-text">"Hapus?"</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirm_delete.set(false);
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirm_delete.set(false);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
