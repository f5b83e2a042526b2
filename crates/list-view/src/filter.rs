//! Filter Engine
//!
//! Conjunction of independently toggleable facets over an in-memory collection.
//! Facets combine with AND; values selected within one facet combine with OR.

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

use chrono::NaiveDate;

/// A record the filter engine can inspect
pub trait Filterable {
    /// Facet identifier (district, status, report type...)
    type Facet: Copy + Eq + Hash;

    /// Value of this record for a facet.
    ///
    /// `None` means the nested object backing the facet is missing, which
    /// excludes the record whenever that facet has a selection.
    fn facet_value(&self, facet: Self::Facet) -> Option<String>;

    /// Stringified fields searched by the keyword
    fn keyword_fields(&self) -> Vec<String>;

    /// Date used by the date-range facet
    fn record_date(&self) -> Option<NaiveDate>;
}

/// Inclusive date range, each bound optional
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

/// Selected values per facet plus keyword and date range
#[derive(Clone, Debug, PartialEq)]
pub struct FilterSpec<F: Eq + Hash> {
    selections: HashMap<F, BTreeSet<String>>,
    keyword: String,
    date_range: DateRange,
}

impl<F: Copy + Eq + Hash> Default for FilterSpec<F> {
    fn default() -> Self {
        Self {
            selections: HashMap::new(),
            keyword: String::new(),
            date_range: DateRange::default(),
        }
    }
}

impl<F: Copy + Eq + Hash> FilterSpec<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected values of a facet, if any
    pub fn selected(&self, facet: F) -> Option<&BTreeSet<String>> {
        self.selections.get(&facet).filter(|values| !values.is_empty())
    }

    pub fn is_selected(&self, facet: F, value: &str) -> bool {
        self.selections
            .get(&facet)
            .is_some_and(|values| values.contains(value))
    }

    /// Add the value if absent, remove it if present
    pub fn toggle(&mut self, facet: F, value: impl Into<String>) {
        let value = value.into();
        let values = self.selections.entry(facet).or_default();
        if !values.remove(&value) {
            values.insert(value);
        }
        if values.is_empty() {
            self.selections.remove(&facet);
        }
    }

    /// Replace the whole selection of a facet
    pub fn select<I, S>(&mut self, facet: F, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            self.selections.remove(&facet);
        } else {
            self.selections.insert(facet, values);
        }
    }

    /// Replace a broader facet's selection and clear the narrower ones,
    /// whose choices only make sense inside the broader selection.
    pub fn select_resetting<I, S>(&mut self, facet: F, values: I, narrower: &[F])
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select(facet, values);
        for narrow in narrower {
            self.selections.remove(narrow);
        }
    }

    /// Toggle one value of a broader facet and clear the narrower ones
    pub fn toggle_resetting(&mut self, facet: F, value: impl Into<String>, narrower: &[F]) {
        self.toggle(facet, value);
        for narrow in narrower {
            self.selections.remove(narrow);
        }
    }

    pub fn clear_facet(&mut self, facet: F) {
        self.selections.remove(&facet);
    }

    pub fn clear_facets(&mut self, facets: &[F]) {
        for facet in facets {
            self.selections.remove(facet);
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        self.keyword = keyword.into();
    }

    pub fn date_range(&self) -> DateRange {
        self.date_range
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        self.date_range = range;
    }

    /// Number of facets currently narrowing the result
    pub fn active_count(&self) -> usize {
        let keyword = usize::from(!self.keyword.trim().is_empty());
        let dates = usize::from(self.date_range.is_active());
        self.selections.values().filter(|v| !v.is_empty()).count() + keyword + dates
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether a record passes one facet; an unselected facet passes everything
    fn passes<T>(&self, item: &T, facet: F) -> bool
    where
        T: Filterable<Facet = F>,
    {
        match self.selected(facet) {
            None => true,
            Some(values) => item
                .facet_value(facet)
                .is_some_and(|value| values.contains(&value)),
        }
    }

    /// Whether one record passes every active facet
    pub fn matches<T>(&self, item: &T) -> bool
    where
        T: Filterable<Facet = F>,
    {
        if !self.selections.keys().all(|facet| self.passes(item, *facet)) {
            return false;
        }

        let needle = self.keyword.trim().to_lowercase();
        if !needle.is_empty()
            && !item
                .keyword_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        {
            return false;
        }

        if self.date_range.is_active() {
            match item.record_date() {
                Some(date) if self.date_range.contains(date) => {}
                _ => return false,
            }
        }

        true
    }

    /// Records passing every active facet, in input order
    pub fn apply<'a, T>(&self, items: &'a [T]) -> Vec<&'a T>
    where
        T: Filterable<Facet = F>,
    {
        items.iter().filter(|item| self.matches(*item)).collect()
    }

    /// Choices of a narrower facet, limited to records inside the current
    /// selection of each `broader` facet
    pub fn options_within<T>(&self, items: &[T], facet: F, broader: &[F]) -> Vec<String>
    where
        T: Filterable<Facet = F>,
    {
        distinct_values(
            items
                .iter()
                .filter(|item| broader.iter().all(|b| self.passes(*item, *b)))
                .filter_map(|item| item.facet_value(facet)),
        )
    }
}

/// Distinct non-empty values of a facet, sorted, for building a dropdown
pub fn facet_options<T: Filterable>(items: &[T], facet: T::Facet) -> Vec<String> {
    distinct_values(items.iter().filter_map(|item| item.facet_value(facet)))
}

fn distinct_values(values: impl Iterator<Item = String>) -> Vec<String> {
    values
        .filter(|value| !value.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Facet {
        Jenis,
        Kabupaten,
        Kecamatan,
    }

    #[derive(Debug, PartialEq)]
    struct Row {
        id: u32,
        jenis: &'static str,
        kabupaten: Option<&'static str>,
        kecamatan: Option<&'static str>,
        deskripsi: &'static str,
        tanggal: Option<NaiveDate>,
    }

    impl Filterable for Row {
        type Facet = Facet;

        fn facet_value(&self, facet: Facet) -> Option<String> {
            match facet {
                Facet::Jenis => Some(self.jenis.to_string()),
                Facet::Kabupaten => self.kabupaten.map(str::to_string),
                Facet::Kecamatan => self.kecamatan.map(str::to_string),
            }
        }

        fn keyword_fields(&self) -> Vec<String> {
            vec![
                self.deskripsi.to_string(),
                self.kabupaten.unwrap_or_default().to_string(),
            ]
        }

        fn record_date(&self) -> Option<NaiveDate> {
            self.tanggal
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 1, jenis: "Produk", kabupaten: Some("Sleman"), kecamatan: Some("Depok"), deskripsi: "Keripik tempe", tanggal: Some(date(2024, 1, 10)) },
            Row { id: 2, jenis: "Anggota", kabupaten: Some("Kab. Bantul"), kecamatan: Some("Sewon"), deskripsi: "Anggota baru", tanggal: Some(date(2024, 2, 1)) },
            Row { id: 3, jenis: "Kas", kabupaten: None, kecamatan: None, deskripsi: "Iuran bulanan", tanggal: Some(date(2024, 3, 5)) },
            Row { id: 4, jenis: "Produk", kabupaten: Some("Kab. Bantul"), kecamatan: Some("Imogiri"), deskripsi: "Batik tulis", tanggal: None },
        ]
    }

    fn ids(result: &[&Row]) -> Vec<u32> {
        result.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_toggle_resetting_keeps_unrelated_facets() {
        let mut filter = FilterSpec::new();
        filter.toggle(Facet::Kecamatan, "Sewon");
        filter.toggle(Facet::Jenis, "Produk");
        filter.toggle_resetting(Facet::Kabupaten, "Kab. Bantul", &[Facet::Kecamatan]);
        assert!(filter.is_selected(Facet::Kabupaten, "Kab. Bantul"));
        assert!(filter.selected(Facet::Kecamatan).is_none());
        assert!(filter.is_selected(Facet::Jenis, "Produk"));

        filter.toggle_resetting(Facet::Kabupaten, "Kab. Bantul", &[Facet::Kecamatan]);
        assert!(filter.selected(Facet::Kabupaten).is_none());
    }

    #[test]
    fn test_facet_options_are_distinct_and_sorted() {
        assert_eq!(facet_options(&rows(), Facet::Kabupaten), vec!["Kab. Bantul", "Sleman"]);
        assert_eq!(facet_options(&rows(), Facet::Jenis), vec!["Anggota", "Kas", "Produk"]);
    }

    #[test]
    fn test_empty_spec_is_identity() {
        let items = rows();
        let spec = FilterSpec::<Facet>::new();
        assert!(spec.is_empty());
        assert_eq!(ids(&spec.apply(&items)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_or_within_facet() {
        let items = rows();
        let mut spec = FilterSpec::new();
        spec.toggle(Facet::Jenis, "Produk");
        let before = ids(&spec.apply(&items));
        assert_eq!(before, vec![1, 4]);

        spec.toggle(Facet::Jenis, "Kas");
        let after = ids(&spec.apply(&items));
        assert!(before.iter().all(|id| after.contains(id)));
        assert_eq!(after, vec![1, 3, 4]);
    }

    #[test]
    fn test_and_across_facets_only_narrows() {
        let items = rows();
        let mut spec = FilterSpec::new();
        spec.toggle(Facet::Jenis, "Produk");
        let before = ids(&spec.apply(&items));

        spec.toggle(Facet::Kabupaten, "Kab. Bantul");
        let after = ids(&spec.apply(&items));
        assert!(after.iter().all(|id| before.contains(id)));
        assert_eq!(after, vec![4]);
    }

    #[test]
    fn test_toggle_twice_deactivates_facet() {
        let mut spec = FilterSpec::new();
        spec.toggle(Facet::Jenis, "Produk");
        spec.toggle(Facet::Jenis, "Produk");
        assert!(spec.selected(Facet::Jenis).is_none());
        assert!(spec.is_empty());
    }

    #[test]
    fn test_missing_nested_object_excluded_only_when_facet_active() {
        let items = rows();
        let mut spec = FilterSpec::new();
        spec.toggle(Facet::Jenis, "Kas");
        assert_eq!(ids(&spec.apply(&items)), vec![3]);

        spec.toggle(Facet::Kabupaten, "Sleman");
        assert!(spec.apply(&items).is_empty());
    }

    #[test]
    fn test_keyword_is_case_insensitive_any_field() {
        let items = rows();
        let mut spec = FilterSpec::new();
        spec.set_keyword("sleman");
        assert_eq!(ids(&spec.apply(&items)), vec![1]);

        spec.set_keyword("  BATIK ");
        assert_eq!(ids(&spec.apply(&items)), vec![4]);

        spec.set_keyword("   ");
        assert!(spec.is_empty());
    }

    #[test]
    fn test_date_range_inclusive_and_open_ended() {
        let items = rows();
        let mut spec = FilterSpec::<Facet>::new();
        spec.set_date_range(DateRange::new(Some(date(2024, 1, 10)), Some(date(2024, 2, 1))));
        assert_eq!(ids(&spec.apply(&items)), vec![1, 2]);

        spec.set_date_range(DateRange::new(Some(date(2024, 2, 1)), None));
        assert_eq!(ids(&spec.apply(&items)), vec![2, 3]);

        spec.set_date_range(DateRange::new(None, Some(date(2024, 1, 31))));
        assert_eq!(ids(&spec.apply(&items)), vec![1]);
    }

    #[test]
    fn test_narrower_choices_follow_broader_selection() {
        let items = rows();
        let mut spec = FilterSpec::new();
        assert_eq!(
            spec.options_within(&items, Facet::Kecamatan, &[Facet::Kabupaten]),
            vec!["Depok", "Imogiri", "Sewon"]
        );

        spec.toggle_resetting(Facet::Kabupaten, "Kab. Bantul", &[Facet::Kecamatan]);
        let choices = spec.options_within(&items, Facet::Kecamatan, &[Facet::Kabupaten]);
        assert_eq!(choices, vec!["Imogiri", "Sewon"]);

        // every offered choice keeps at least one row
        for choice in choices {
            let mut narrowed = spec.clone();
            narrowed.toggle(Facet::Kecamatan, choice);
            assert!(!narrowed.apply(&items).is_empty());
        }
    }

    #[test]
    fn test_clear_facets_leaves_others() {
        let mut spec = FilterSpec::new();
        spec.toggle(Facet::Kabupaten, "Sleman");
        spec.toggle(Facet::Kecamatan, "Depok");
        spec.toggle(Facet::Jenis, "Produk");

        spec.clear_facets(&[Facet::Kabupaten, Facet::Kecamatan]);

        assert!(spec.selected(Facet::Kabupaten).is_none());
        assert!(spec.selected(Facet::Kecamatan).is_none());
        assert!(spec.is_selected(Facet::Jenis, "Produk"));
    }

    #[test]
    fn test_select_resetting_clears_narrower_facets() {
        let mut spec = FilterSpec::new();
        spec.toggle(Facet::Kecamatan, "Depok");
        spec.toggle(Facet::Jenis, "Produk");

        spec.select_resetting(Facet::Kabupaten, ["Kab. Bantul"], &[Facet::Kecamatan]);

        assert!(spec.selected(Facet::Kecamatan).is_none());
        assert!(spec.is_selected(Facet::Kabupaten, "Kab. Bantul"));
        assert!(spec.is_selected(Facet::Jenis, "Produk"));
    }
}
