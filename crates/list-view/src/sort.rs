//! Sort Engine
//!
//! Orders rows by one selected key. Equal keys fall back to the record id,
//! and the fallback flips with the direction, so descending is always the
//! exact reverse of ascending.

use std::cmp::Ordering;

use chrono::NaiveDate;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Comparable projection of a field. Missing values order first.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Missing,
    Number(i64),
    Date(NaiveDate),
    Text(String),
}

impl SortValue {
    /// Case-insensitive text key
    pub fn text(value: &str) -> Self {
        SortValue::Text(value.to_lowercase())
    }

    pub fn optional_date(value: Option<NaiveDate>) -> Self {
        value.map_or(SortValue::Missing, SortValue::Date)
    }
}

/// A record the sort engine can order
pub trait Sortable {
    type Key: Copy + Eq;

    fn sort_value(&self, key: Self::Key) -> SortValue;

    /// Secondary key for equal primary values, usually the id
    fn tie_breaker(&self) -> i64;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortSpec<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K: Copy + Eq> SortSpec<K> {
    pub fn new(key: K, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    pub fn ascending(key: K) -> Self {
        Self::new(key, SortDirection::Ascending)
    }

    pub fn descending(key: K) -> Self {
        Self::new(key, SortDirection::Descending)
    }

    /// Header click: same key flips direction, a new key starts ascending
    pub fn toggle(&mut self, key: K) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key;
            self.direction = SortDirection::Ascending;
        }
    }

    /// Direction arrow for a column header, empty for inactive columns
    pub fn indicator(&self, key: K) -> &'static str {
        if self.key == key {
            self.direction.arrow()
        } else {
            ""
        }
    }

    pub fn compare<T>(&self, a: &T, b: &T) -> Ordering
    where
        T: Sortable<Key = K>,
    {
        let ordering = a
            .sort_value(self.key)
            .cmp(&b.sort_value(self.key))
            .then_with(|| a.tie_breaker().cmp(&b.tie_breaker()));
        self.direction.apply(ordering)
    }
}

/// Sort a fresh row vector; the source collection is left untouched
pub fn sort_rows<'a, T>(mut rows: Vec<&'a T>, spec: &SortSpec<T::Key>) -> Vec<&'a T>
where
    T: Sortable,
{
    rows.sort_by(|a, b| spec.compare(*a, *b));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Key {
        Nama,
        Total,
        Tanggal,
    }

    struct Entry {
        id: i64,
        nama: &'static str,
        total: i64,
        tanggal: Option<NaiveDate>,
    }

    impl Sortable for Entry {
        type Key = Key;

        fn sort_value(&self, key: Key) -> SortValue {
            match key {
                Key::Nama => SortValue::text(self.nama),
                Key::Total => SortValue::Number(self.total),
                Key::Tanggal => SortValue::optional_date(self.tanggal),
            }
        }

        fn tie_breaker(&self) -> i64 {
            self.id
        }
    }

    fn entries() -> Vec<Entry> {
        vec![
            Entry { id: 1, nama: "kopi", total: 50_000, tanggal: NaiveDate::from_ymd_opt(2024, 5, 1) },
            Entry { id: 2, nama: "Beras", total: 20_000, tanggal: None },
            Entry { id: 3, nama: "anyaman", total: 50_000, tanggal: NaiveDate::from_ymd_opt(2024, 1, 1) },
            Entry { id: 4, nama: "Madu", total: 75_000, tanggal: NaiveDate::from_ymd_opt(2024, 3, 1) },
        ]
    }

    fn ids(rows: &[&Entry]) -> Vec<i64> {
        rows.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_text_sort_is_case_insensitive() {
        let items = entries();
        let sorted = sort_rows(items.iter().collect(), &SortSpec::ascending(Key::Nama));
        assert_eq!(ids(&sorted), vec![3, 2, 1, 4]);
    }

    #[test]
    fn test_ties_fall_back_to_id() {
        let items = entries();
        let sorted = sort_rows(items.iter().collect(), &SortSpec::ascending(Key::Total));
        assert_eq!(ids(&sorted), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_flipped_direction_reverses_order() {
        let items = entries();
        for key in [Key::Nama, Key::Total, Key::Tanggal] {
            let asc = sort_rows(items.iter().collect(), &SortSpec::ascending(key));
            let mut desc = sort_rows(items.iter().collect(), &SortSpec::descending(key));
            desc.reverse();
            assert_eq!(ids(&asc), ids(&desc));
        }
    }

    #[test]
    fn test_missing_dates_sort_first() {
        let items = entries();
        let sorted = sort_rows(items.iter().collect(), &SortSpec::ascending(Key::Tanggal));
        assert_eq!(ids(&sorted), vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_source_left_untouched() {
        let items = entries();
        let _ = sort_rows(items.iter().collect(), &SortSpec::descending(Key::Total));
        assert_eq!(items.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_toggle_header() {
        let mut spec = SortSpec::ascending(Key::Nama);
        spec.toggle(Key::Nama);
        assert_eq!(spec.direction, SortDirection::Descending);
        spec.toggle(Key::Total);
        assert_eq!(spec, SortSpec::ascending(Key::Total));
        assert_eq!(spec.indicator(Key::Total), "▲");
        assert_eq!(spec.indicator(Key::Nama), "");
    }
}
