//! Pagination Bar Component
//!
//! First/previous/next/last, a small window of numbered pages, the
//! "showing x-y of n" summary and the page size picker.

use leptos::prelude::*;
use list_view::{Paginator, PAGE_SIZE_OPTIONS};

/// One user interaction with the pagination bar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageAction {
    First,
    Previous,
    Next,
    Last,
    GoTo(usize),
    PageSize(usize),
}

impl PageAction {
    pub fn apply(self, paginator: &mut Paginator) {
        match self {
            PageAction::First => paginator.first(),
            PageAction::Previous => paginator.previous(),
            PageAction::Next => paginator.next(),
            PageAction::Last => paginator.last(),
            PageAction::GoTo(page) => paginator.go_to(page),
            PageAction::PageSize(size) => paginator.set_page_size(size),
        }
    }
}

#[component]
pub fn PaginationBar(
    #[prop(into)] paginator: Signal<Paginator>,
    #[prop(into)] on_action: Callback<PageAction>,
) -> impl IntoView {
    let summary = move || {
        let p = paginator.get();
        let (from, to) = p.showing();
        format!("Menampilkan {}-{} dari {} data", from, to, p.total())
    };

    view! {
        <div class="pagination-bar">
            <span class="pagination-summary">{summary}</span>

            <div class="pagination-controls">
                <button
                    class="page-btn"
                    disabled=move || !paginator.get().can_previous()
                    on:click=move |_| on_action.run(PageAction::First)
                >
                    "«"
                </button>
                <button
                    class="page-btn"
                    disabled=move || !paginator.get().can_previous()
                    on:click=move |_| on_action.run(PageAction::Previous)
                >
                    "‹"
                </button>

                {move || {
                    let current = paginator.get().page();
                    paginator.get().window().map(|page| {
                        let class = if page == current { "page-btn active" } else { "page-btn" };
                        view! {
                            <button class=class on:click=move |_| on_action.run(PageAction::GoTo(page))>
                                {page + 1}
                            </button>
                        }
                    }).collect_view()
                }}

                <button
                    class="page-btn"
                    disabled=move || !paginator.get().can_next()
                    on:click=move |_| on_action.run(PageAction::Next)
                >
                    "›"
                </button>
                <button
                    class="page-btn"
                    disabled=move || !paginator.get().can_next()
                    on:click=move |_| on_action.run(PageAction::Last)
                >
                    "»"
                </button>
            </div>

            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                        on_action.run(PageAction::PageSize(size));
                    }
                }
            >
                {PAGE_SIZE_OPTIONS.iter().map(|size| {
                    let size = *size;
                    view! {
                        <option value=size.to_string() selected=move || paginator.get().page_size() == size>
                            {format!("{} / halaman", size)}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}
