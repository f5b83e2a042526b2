//! Filter Bar Components
//!
//! Keyword box, date range pickers and the reset button shared by list screens.

use leptos::prelude::*;
use list_view::DateRange;

use crate::format;

/// Free-text search box
#[component]
pub fn KeywordInput(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(into, default = "Cari...".to_string())] placeholder: String,
) -> impl IntoView {
    view! {
        <input
            type="search"
            class="keyword-input"
            placeholder=placeholder
            prop:value=move || value.get()
            on:input=move |ev| on_input.run(event_target_value(&ev))
        />
    }
}

/// Inclusive start/end date pickers
#[component]
pub fn DateRangeInput(
    #[prop(into)] range: Signal<DateRange>,
    #[prop(into)] on_change: Callback<DateRange>,
) -> impl IntoView {
    let set_start = move |ev| {
        let current = range.get_untracked();
        on_change.run(DateRange::new(format::parse_input_date(&event_target_value(&ev)), current.end));
    };
    let set_end = move |ev| {
        let current = range.get_untracked();
        on_change.run(DateRange::new(current.start, format::parse_input_date(&event_target_value(&ev))));
    };

    view! {
        <div class="date-range">
            <label>
                "Dari"
                <input
                    type="date"
                    prop:value=move || format::input_date(range.get().start)
                    on:change=set_start
                />
            </label>
            <label>
                "Sampai"
                <input
                    type="date"
                    prop:value=move || format::input_date(range.get().end)
                    on:change=set_end
                />
            </label>
        </div>
    }
}

/// Clears every facet; hidden while nothing is active
#[component]
pub fn ResetFiltersButton(
    #[prop(into)] active_count: Signal<usize>,
    #[prop(into)] on_reset: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || { active_count.get() > 0 }>
            <button class="reset-filters-btn" on:click=move |_| on_reset.run(())>
                {move || format!("Reset filter ({})", active_count.get())}
            </button>
        </Show>
    }
}
