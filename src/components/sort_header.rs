//! Sortable Column Header Component

use leptos::prelude::*;
use list_view::SortSpec;

/// Table header cell; clicking toggles the sort on `column`
#[component]
pub fn SortHeader<K>(
    #[prop(into)] label: String,
    column: K,
    #[prop(into)] sort: Signal<SortSpec<K>>,
    #[prop(into)] on_sort: Callback<K>,
) -> impl IntoView
where
    K: Copy + Eq + Send + Sync + 'static,
{
    view! {
        <th
            class=move || if sort.get().key == column { "sortable sorted" } else { "sortable" }
            on:click=move |_| on_sort.run(column)
        >
            {label}
            <span class="sort-indicator">{move || sort.get().indicator(column)}</span>
        </th>
    }
}
