//! List Screen Plumbing
//!
//! Binds a `ListState` to signals and callbacks for the filter bar, sort
//! headers, pagination and exports, plus the loading/empty/error banner.

use std::hash::Hash;

use leptos::prelude::*;
use list_view::{facet_options, DateRange, Filterable, ListPage, ListState, LoadState, Paginator, SortSpec, Sortable};

use super::multi_select::FacetSelect;
use super::pagination::PageAction;

/// Copyable handle to one screen's filter, sort and page state
pub struct ListControls<F, K>
where
    F: Copy + Eq + Hash + Send + Sync + 'static,
    K: Copy + Eq + Send + Sync + 'static,
{
    pub state: RwSignal<ListState<F, K>>,
}

impl<F, K> Clone for ListControls<F, K>
where
    F: Copy + Eq + Hash + Send + Sync + 'static,
    K: Copy + Eq + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<F, K> Copy for ListControls<F, K>
where
    F: Copy + Eq + Hash + Send + Sync + 'static,
    K: Copy + Eq + Send + Sync + 'static,
{
}

impl<F, K> ListControls<F, K>
where
    F: Copy + Eq + Hash + Send + Sync + 'static,
    K: Copy + Eq + Send + Sync + 'static,
{
    pub fn new(sort: SortSpec<K>, page_size: usize) -> Self {
        Self {
            state: RwSignal::new(ListState::new(sort, page_size)),
        }
    }

    // ========================
    // Filter
    // ========================

    pub fn keyword(self) -> Signal<String> {
        Signal::derive(move || self.state.with(|s| s.filter.keyword().to_string()))
    }

    pub fn on_keyword(self) -> Callback<String> {
        Callback::new(move |keyword: String| self.state.update(|s| s.refine(|f| f.set_keyword(keyword))))
    }

    pub fn date_range(self) -> Signal<DateRange> {
        Signal::derive(move || self.state.with(|s| s.filter.date_range()))
    }

    pub fn on_date_range(self) -> Callback<DateRange> {
        Callback::new(move |range: DateRange| self.state.update(|s| s.refine(|f| f.set_date_range(range))))
    }

    pub fn selected(self, facet: F) -> Signal<Vec<String>> {
        Signal::derive(move || {
            self.state.with(|s| {
                s.filter
                    .selected(facet)
                    .map(|values| values.iter().cloned().collect())
                    .unwrap_or_default()
            })
        })
    }

    pub fn on_toggle(self, facet: F) -> Callback<String> {
        Callback::new(move |value: String| self.state.update(|s| s.refine(|f| f.toggle(facet, value))))
    }

    /// Toggle on a broader facet, clearing the `narrower` selections
    pub fn on_toggle_resetting(self, facet: F, narrower: &'static [F]) -> Callback<String> {
        Callback::new(move |value: String| {
            self.state.update(|s| s.refine(|f| f.toggle_resetting(facet, value, narrower)))
        })
    }

    pub fn on_clear(self, facet: F) -> Callback<()> {
        Callback::new(move |_| self.state.update(|s| s.refine(|f| f.clear_facet(facet))))
    }

    /// Drop several selections at once, e.g. the region facets after the
    /// server-side district changes
    pub fn on_clear_facets(self, facets: &'static [F]) -> Callback<()> {
        Callback::new(move |_| self.state.update(|s| s.refine(|f| f.clear_facets(facets))))
    }

    /// Choices of a narrower facet, limited to rows inside the `broader` selections
    pub fn scoped_choices<T>(
        self,
        items: RwSignal<LoadState<T>>,
        facet: F,
        broader: &'static [F],
    ) -> Signal<Vec<(String, String)>>
    where
        T: Filterable<Facet = F> + Send + Sync + 'static,
    {
        Signal::derive(move || {
            items.with(|loaded| {
                self.state.with(|s| {
                    s.filter
                        .options_within(loaded.items(), facet, broader)
                        .into_iter()
                        .map(|value| (value.clone(), value))
                        .collect()
                })
            })
        })
    }

    pub fn active_count(self) -> Signal<usize> {
        Signal::derive(move || self.state.with(|s| s.filter.active_count()))
    }

    pub fn on_reset(self) -> Callback<()> {
        Callback::new(move |_| self.state.update(|s| s.refine(|f| f.clear())))
    }

    /// Dropdown for one facet
    pub fn facet_select(
        self,
        label: &'static str,
        facet: F,
        options: Signal<Vec<(String, String)>>,
    ) -> impl IntoView {
        self.facet_view(label, facet, options, self.on_toggle(facet))
    }

    /// Dropdown for a broader facet whose changes clear `narrower`
    pub fn facet_select_resetting(
        self,
        label: &'static str,
        facet: F,
        options: Signal<Vec<(String, String)>>,
        narrower: &'static [F],
    ) -> impl IntoView {
        self.facet_view(label, facet, options, self.on_toggle_resetting(facet, narrower))
    }

    fn facet_view(
        self,
        label: &'static str,
        facet: F,
        options: Signal<Vec<(String, String)>>,
        on_toggle: Callback<String>,
    ) -> impl IntoView {
        view! {
            <FacetSelect
                label=label
                options=options
                selected=self.selected(facet)
                on_toggle=on_toggle
                on_clear=self.on_clear(facet)
            />
        }
    }

    // ========================
    // Sort
    // ========================

    pub fn sort(self) -> Signal<SortSpec<K>> {
        Signal::derive(move || self.state.with(|s| s.sort))
    }

    pub fn on_sort(self) -> Callback<K> {
        Callback::new(move |key: K| self.state.update(|s| s.sort_by(key)))
    }

    // ========================
    // Rows
    // ========================

    /// Current page of the loaded collection
    pub fn page<T>(self, items: RwSignal<LoadState<T>>) -> Memo<ListPage<T>>
    where
        T: Filterable<Facet = F> + Sortable<Key = K> + Clone + PartialEq + Send + Sync + 'static,
    {
        Memo::new(move |_| items.with(|loaded| self.state.with(|s| s.page(loaded.items()))))
    }

    pub fn on_page<T>(self, page: Memo<ListPage<T>>) -> Callback<PageAction>
    where
        T: Clone + PartialEq + Send + Sync + 'static,
    {
        Callback::new(move |action: PageAction| {
            let total = page.with_untracked(|p| p.filtered_total);
            self.state.update(|s| s.navigate(total, |p| action.apply(p)));
        })
    }

    pub fn paginator<T>(self, page: Memo<ListPage<T>>) -> Signal<Paginator>
    where
        T: Clone + PartialEq + Send + Sync + 'static,
    {
        Signal::derive(move || page.with(|p| p.paginator))
    }

    pub fn filtered_total<T>(self, page: Memo<ListPage<T>>) -> Signal<usize>
    where
        T: Clone + PartialEq + Send + Sync + 'static,
    {
        Signal::derive(move || page.with(|p| p.filtered_total))
    }

    /// All filtered and sorted rows, for exports
    pub fn export_rows<T>(self, items: RwSignal<LoadState<T>>) -> Callback<(), Vec<T>>
    where
        T: Filterable<Facet = F> + Sortable<Key = K> + Clone + Send + Sync + 'static,
    {
        Callback::new(move |_| {
            items.with_untracked(|loaded| {
                self.state
                    .with_untracked(|s| s.rows(loaded.items()).into_iter().cloned().collect())
            })
        })
    }
}

/// Dropdown choices of a facet, taken from the loaded rows
pub fn facet_choices<T>(items: RwSignal<LoadState<T>>, facet: T::Facet) -> Signal<Vec<(String, String)>>
where
    T: Filterable + Send + Sync + 'static,
    T::Facet: Send + Sync + 'static,
{
    Signal::derive(move || {
        items.with(|loaded| {
            facet_options(loaded.items(), facet)
                .into_iter()
                .map(|value| (value.clone(), value))
                .collect()
        })
    })
}

/// Loading, error and empty states of a list
#[component]
pub fn ListStatus<T>(
    items: RwSignal<LoadState<T>>,
    #[prop(into)] filtered_total: Signal<usize>,
) -> impl IntoView
where
    T: Send + Sync + 'static,
{
    move || {
        items.with(|loaded| match loaded {
            LoadState::Loading => Some(view! { <p class="list-status">"Memuat data..."</p> }.into_any()),
            LoadState::Failed(message) => Some(
                view! { <p class="list-status error">{format!("Gagal memuat data: {}", message)}</p> }.into_any(),
            ),
            LoadState::Ready(_) if filtered_total.get() == 0 => {
                Some(view! { <p class="list-status">"Tidak ada data"</p> }.into_any())
            }
            LoadState::Ready(_) => None,
        })
    }
}
