//! List View Core
//!
//! Rendering-independent pieces shared by every list screen: a facet filter
//! engine, a stable sort engine, a paginator, the confirmation submit flow,
//! and request sequencing for list fetches.

pub mod fetch;
pub mod filter;
pub mod flow;
pub mod paginate;
pub mod sort;
pub mod view;

pub use fetch::{LoadState, RequestSequence, Ticket};
pub use filter::{facet_options, DateRange, FilterSpec, Filterable};
pub use flow::{FlowOutcome, SubmitFlow};
pub use paginate::{page_slice, page_window, Paginator, PAGE_SIZE_OPTIONS, PAGE_WINDOW};
pub use sort::{sort_rows, SortDirection, SortSpec, SortValue, Sortable};
pub use view::{ListPage, ListState};
