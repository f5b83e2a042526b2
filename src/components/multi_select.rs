//! Facet Multi-Select Component
//!
//! Dropdown of checkboxes for one filter facet. Values picked here combine
//! with OR; the screen combines facets with AND.

use leptos::prelude::*;

/// Dropdown of checkbox options, each `(value, label)`
#[component]
pub fn FacetSelect(
    #[prop(into)] label: String,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    #[prop(into)] selected: Signal<Vec<String>>,
    #[prop(into)] on_toggle: Callback<String>,
    #[prop(into)] on_clear: Callback<()>,
) -> impl IntoView {
    let (open, set_open) = signal(false);

    let button_text = move || {
        let count = selected.get().len();
        if count == 0 {
            label.clone()
        } else {
            format!("{} ({})", label, count)
        }
    };

    view! {
        <div class="facet-select">
            <button
                type="button"
                class=move || if selected.get().is_empty() { "facet-btn" } else { "facet-btn active" }
                on:click=move |_| set_open.update(|o| *o = !*o)
            >
                {button_text}
                " ▾"
            </button>

            <Show when=move || open.get()>
                <div class="facet-dropdown">
                    {move || {
                        let options = options.get();
                        if options.is_empty() {
                            view! { <p class="facet-empty">"Tidak ada pilihan"</p> }.into_any()
                        } else {
                            options.into_iter().map(|(value, text)| {
                                let checked_value = value.clone();
                                let is_checked = move || selected.get().contains(&checked_value);
                                view! {
                                    <label class="facet-option">
                                        <input
                                            type="checkbox"
                                            prop:checked=is_checked
                                            on:change=move |_| on_toggle.run(value.clone())
                                        />
                                        {text}
                                    </label>
                                }
                            }).collect_view().into_any()
                        }
                    }}
                    <div class="facet-actions">
                        <button type="button" on:click=move |_| on_clear.run(())>"Hapus pilihan"</button>
                        <button type="button" on:click=move |_| set_open.set(false)>"Tutup"</button>
                    </div>
                </div>
            </Show>
        </div>
    }
}
