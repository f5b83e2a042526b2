//! List State
//!
//! Filter, sort and pagination state for one list screen, and the page of
//! rows it produces from a loaded collection.

use std::hash::Hash;

use crate::filter::{FilterSpec, Filterable};
use crate::paginate::Paginator;
use crate::sort::{sort_rows, SortSpec, Sortable};

/// One rendered page plus the paginator sized to the filtered total
#[derive(Clone, Debug, PartialEq)]
pub struct ListPage<T> {
    pub rows: Vec<T>,
    pub filtered_total: usize,
    pub paginator: Paginator,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListState<F: Copy + Eq + Hash, K: Copy + Eq> {
    pub filter: FilterSpec<F>,
    pub sort: SortSpec<K>,
    pub paginator: Paginator,
}

impl<F: Copy + Eq + Hash, K: Copy + Eq> ListState<F, K> {
    pub fn new(sort: SortSpec<K>, page_size: usize) -> Self {
        Self {
            filter: FilterSpec::new(),
            sort,
            paginator: Paginator::new(page_size),
        }
    }

    /// Change the filter and restart at the first page
    pub fn refine(&mut self, change: impl FnOnce(&mut FilterSpec<F>)) {
        change(&mut self.filter);
        self.paginator.first();
    }

    /// Header click on a sortable column
    pub fn sort_by(&mut self, key: K) {
        self.sort.toggle(key);
    }

    /// Page navigation against the current filtered total
    pub fn navigate(&mut self, filtered_total: usize, change: impl FnOnce(&mut Paginator)) {
        self.paginator.set_total(filtered_total);
        change(&mut self.paginator);
    }

    /// Filtered and sorted rows, borrowed from the collection
    pub fn rows<'a, T>(&self, items: &'a [T]) -> Vec<&'a T>
    where
        T: Filterable<Facet = F> + Sortable<Key = K>,
    {
        sort_rows(self.filter.apply(items), &self.sort)
    }

    /// Current page of the filtered and sorted rows
    pub fn page<T>(&self, items: &[T]) -> ListPage<T>
    where
        T: Filterable<Facet = F> + Sortable<Key = K> + Clone,
    {
        let rows = self.rows(items);
        let mut paginator = self.paginator;
        paginator.set_total(rows.len());
        ListPage {
            rows: paginator.slice(&rows).iter().map(|row| (*row).clone()).collect(),
            filtered_total: rows.len(),
            paginator,
        }
    }
}
