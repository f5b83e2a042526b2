//! List Bindings
//!
//! Facets, sort keys and keyword fields of each listed entity, wiring the
//! models into the generic filter and sort engines.

use chrono::NaiveDate;
use list_view::{Filterable, SortValue, Sortable};

use crate::format;
use crate::models::{Activity, CashEntry, Entity, Member, Product, Report, ReportItem, ReportPayload, VillageGroup};

// ========================
// Village groups
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupFacet {
    Status,
    Kategori,
    Kabupaten,
    Kecamatan,
}

/// Facets cleared when a kabupaten is picked on the group list
pub const GROUP_DISTRICT_NARROWER: [GroupFacet; 1] = [GroupFacet::Kecamatan];
/// Kecamatan choices only come from rows in the selected kabupaten
pub const GROUP_SUBDISTRICT_SCOPE: [GroupFacet; 1] = [GroupFacet::Kabupaten];
/// Client region facets, stale once the server-side kabupaten changes
pub const GROUP_REGION_FACETS: [GroupFacet; 2] = [GroupFacet::Kabupaten, GroupFacet::Kecamatan];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupSortKey {
    Nama,
    Kabupaten,
    Tanggal,
    Status,
    Anggota,
}

impl Filterable for VillageGroup {
    type Facet = GroupFacet;

    fn facet_value(&self, facet: GroupFacet) -> Option<String> {
        match facet {
            GroupFacet::Status => Some(self.status.as_str().to_string()),
            GroupFacet::Kategori => self.kategori.map(|k| k.as_str().to_string()),
            GroupFacet::Kabupaten => self.kabupaten_nama.clone(),
            GroupFacet::Kecamatan => self.kecamatan_nama.clone(),
        }
    }

    fn keyword_fields(&self) -> Vec<String> {
        vec![
            self.nama.clone(),
            self.alamat(),
            self.status.label().to_string(),
            format::optional_date(self.tanggal_pembentukan),
        ]
    }

    fn record_date(&self) -> Option<NaiveDate> {
        self.tanggal_pembentukan
    }
}

impl Sortable for VillageGroup {
    type Key = GroupSortKey;

    fn sort_value(&self, key: GroupSortKey) -> SortValue {
        match key {
            GroupSortKey::Nama => SortValue::text(&self.nama),
            GroupSortKey::Kabupaten => optional_text(self.kabupaten_nama.as_deref()),
            GroupSortKey::Tanggal => SortValue::optional_date(self.tanggal_pembentukan),
            GroupSortKey::Status => SortValue::text(self.status.as_str()),
            GroupSortKey::Anggota => self.jumlah_anggota_awal.map_or(SortValue::Missing, SortValue::Number),
        }
    }

    fn tie_breaker(&self) -> i64 {
        self.id().into()
    }
}

// ========================
// Pelaporan feed
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportFacet {
    Jenis,
    Kabupaten,
    Kecamatan,
    Kelompok,
}

/// Picking a kabupaten clears the kecamatan and kelompok selections
pub const REPORT_DISTRICT_NARROWER: [ReportFacet; 2] = [ReportFacet::Kecamatan, ReportFacet::Kelompok];
/// Picking a kecamatan clears the kelompok selection
pub const REPORT_SUBDISTRICT_NARROWER: [ReportFacet; 1] = [ReportFacet::Kelompok];
pub const REPORT_SUBDISTRICT_SCOPE: [ReportFacet; 1] = [ReportFacet::Kabupaten];
pub const REPORT_GROUP_SCOPE: [ReportFacet; 2] = [ReportFacet::Kabupaten, ReportFacet::Kecamatan];
pub const REPORT_REGION_FACETS: [ReportFacet; 3] =
    [ReportFacet::Kabupaten, ReportFacet::Kecamatan, ReportFacet::Kelompok];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSortKey {
    Tanggal,
    Jenis,
    Kelompok,
}

impl ReportItem {
    /// Money amount carried by the payload, if any
    fn amount(&self) -> Option<i64> {
        match &self.payload {
            ReportPayload::Kas(entry) => Some(entry.total_transaksi),
            ReportPayload::Produk(product) => product.harga_akhir.or(product.harga_awal),
            _ => None,
        }
    }
}

impl Filterable for ReportItem {
    type Facet = ReportFacet;

    fn facet_value(&self, facet: ReportFacet) -> Option<String> {
        match facet {
            ReportFacet::Jenis => Some(self.kind().label().to_string()),
            ReportFacet::Kabupaten => self.group()?.kabupaten_nama.clone(),
            ReportFacet::Kecamatan => self.group()?.kecamatan_nama.clone(),
            ReportFacet::Kelompok => self.group().map(|g| g.nama.clone()),
        }
    }

    fn keyword_fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.deskripsi.clone().unwrap_or_default(),
            self.payload.title().to_string(),
            self.kind().label().to_string(),
        ];
        if let Some(user) = &self.user {
            fields.push(user.name.clone());
        }
        if let Some(group) = self.group() {
            fields.push(group.nama.clone());
            fields.push(group.alamat());
        }
        if let Some(amount) = self.amount() {
            fields.push(format::rupiah(amount));
        }
        if let Some(date) = self.tgl_lapor {
            fields.push(format::date(date));
        }
        fields
    }

    fn record_date(&self) -> Option<NaiveDate> {
        self.tgl_lapor
    }
}

impl Sortable for ReportItem {
    type Key = ReportSortKey;

    fn sort_value(&self, key: ReportSortKey) -> SortValue {
        match key {
            ReportSortKey::Tanggal => SortValue::optional_date(self.tgl_lapor),
            ReportSortKey::Jenis => SortValue::text(self.kind().label()),
            ReportSortKey::Kelompok => optional_text(self.group().map(|g| g.nama.as_str())),
        }
    }

    fn tie_breaker(&self) -> i64 {
        self.id().into()
    }
}

// ========================
// Group components
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberFacet {
    Sertifikasi,
    Jabatan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberSortKey {
    Nama,
    Jabatan,
}

impl Filterable for Member {
    type Facet = MemberFacet;

    fn facet_value(&self, facet: MemberFacet) -> Option<String> {
        match facet {
            MemberFacet::Sertifikasi => self.sertifikasi.map(|s| s.as_str().to_string()),
            MemberFacet::Jabatan => self.jabatan.clone(),
        }
    }

    fn keyword_fields(&self) -> Vec<String> {
        [Some(&self.nama), self.jabatan.as_ref(), self.nohp.as_ref(), self.usaha.as_ref()]
            .into_iter()
            .flatten()
            .cloned()
            .collect()
    }

    fn record_date(&self) -> Option<NaiveDate> {
        None
    }
}

impl Sortable for Member {
    type Key = MemberSortKey;

    fn sort_value(&self, key: MemberSortKey) -> SortValue {
        match key {
            MemberSortKey::Nama => SortValue::text(&self.nama),
            MemberSortKey::Jabatan => optional_text(self.jabatan.as_deref()),
        }
    }

    fn tie_breaker(&self) -> i64 {
        self.id().into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductFacet {
    PelakuUsaha,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSortKey {
    Nama,
    Harga,
}

impl Product {
    /// Owner shown in the table: the linked member, else the free-text field
    pub fn pemilik(&self) -> Option<&str> {
        self.anggota
            .as_ref()
            .map(|m| m.nama.as_str())
            .or(self.pelaku_usaha.as_deref())
    }
}

impl Filterable for Product {
    type Facet = ProductFacet;

    fn facet_value(&self, facet: ProductFacet) -> Option<String> {
        match facet {
            ProductFacet::PelakuUsaha => self.pemilik().map(str::to_string),
        }
    }

    fn keyword_fields(&self) -> Vec<String> {
        let mut fields = vec![self.nama.clone(), self.deskripsi.clone().unwrap_or_default()];
        fields.extend(self.pemilik().map(str::to_string));
        fields.extend(self.harga_awal.map(format::rupiah));
        fields.extend(self.harga_akhir.map(format::rupiah));
        fields
    }

    fn record_date(&self) -> Option<NaiveDate> {
        None
    }
}

impl Sortable for Product {
    type Key = ProductSortKey;

    fn sort_value(&self, key: ProductSortKey) -> SortValue {
        match key {
            ProductSortKey::Nama => SortValue::text(&self.nama),
            ProductSortKey::Harga => self.harga_awal.map_or(SortValue::Missing, SortValue::Number),
        }
    }

    fn tie_breaker(&self) -> i64 {
        self.id().into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CashFacet {
    Jenis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CashSortKey {
    Tanggal,
    Nama,
    Total,
}

impl Filterable for CashEntry {
    type Facet = CashFacet;

    fn facet_value(&self, facet: CashFacet) -> Option<String> {
        match facet {
            CashFacet::Jenis => Some(self.jenis_transaksi.as_str().to_string()),
        }
    }

    fn keyword_fields(&self) -> Vec<String> {
        vec![
            self.nama_transaksi.clone(),
            self.jenis_transaksi.as_str().to_string(),
            format::rupiah(self.total_transaksi),
            format::optional_date(self.tgl_transaksi),
        ]
    }

    fn record_date(&self) -> Option<NaiveDate> {
        self.tgl_transaksi
    }
}

impl Sortable for CashEntry {
    type Key = CashSortKey;

    fn sort_value(&self, key: CashSortKey) -> SortValue {
        match key {
            CashSortKey::Tanggal => SortValue::optional_date(self.tgl_transaksi),
            CashSortKey::Nama => SortValue::text(&self.nama_transaksi),
            CashSortKey::Total => SortValue::Number(self.total_transaksi),
        }
    }

    fn tie_breaker(&self) -> i64 {
        self.id().into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityFacet {
    /// `YYYY-MM` of the activity date
    Bulan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivitySortKey {
    Tanggal,
    Nama,
}

impl Filterable for Activity {
    type Facet = ActivityFacet;

    fn facet_value(&self, facet: ActivityFacet) -> Option<String> {
        match facet {
            ActivityFacet::Bulan => self.tanggal.map(|d| d.format("%Y-%m").to_string()),
        }
    }

    fn keyword_fields(&self) -> Vec<String> {
        vec![
            self.nama_kegiatan.clone(),
            self.uraian.clone().unwrap_or_default(),
            format::optional_date(self.tanggal),
        ]
    }

    fn record_date(&self) -> Option<NaiveDate> {
        self.tanggal
    }
}

impl Sortable for Activity {
    type Key = ActivitySortKey;

    fn sort_value(&self, key: ActivitySortKey) -> SortValue {
        match key {
            ActivitySortKey::Tanggal => SortValue::optional_date(self.tanggal),
            ActivitySortKey::Nama => SortValue::text(&self.nama_kegiatan),
        }
    }

    fn tie_breaker(&self) -> i64 {
        self.id().into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportFileFacet {
    Tahun,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFileSortKey {
    Nama,
    Tanggal,
}

impl Filterable for Report {
    type Facet = ReportFileFacet;

    fn facet_value(&self, facet: ReportFileFacet) -> Option<String> {
        match facet {
            ReportFileFacet::Tahun => self.created_at.map(|d| d.format("%Y").to_string()),
        }
    }

    fn keyword_fields(&self) -> Vec<String> {
        vec![self.nama_laporan.clone(), format::optional_date(self.created_at)]
    }

    fn record_date(&self) -> Option<NaiveDate> {
        self.created_at
    }
}

impl Sortable for Report {
    type Key = ReportFileSortKey;

    fn sort_value(&self, key: ReportFileSortKey) -> SortValue {
        match key {
            ReportFileSortKey::Nama => SortValue::text(&self.nama_laporan),
            ReportFileSortKey::Tanggal => SortValue::optional_date(self.created_at),
        }
    }

    fn tie_breaker(&self) -> i64 {
        self.id().into()
    }
}

fn optional_text(value: Option<&str>) -> SortValue {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => SortValue::text(v),
        _ => SortValue::Missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use list_view::{facet_options, FilterSpec, ListState, SortSpec};
    use serde_json::json;

    fn reports() -> Vec<ReportItem> {
        serde_json::from_value(json!([
            {
                "id": 1,
                "deskripsi": null,
                "tgl_lapor": "2024-02-10",
                "Kelompok": { "id": 5, "nama": "Tani Makmur", "kabupaten_nama": "Kab. Sleman", "kecamatan_nama": "Depok" },
                "Produk": { "id": 8, "nama": "Keripik", "harga_awal": 15000 }
            },
            {
                "id": 2,
                "deskripsi": "Rapat anggota",
                "tgl_lapor": "2024-03-02",
                "Kelompok": { "id": 6, "nama": "Sido Rukun", "kabupaten_nama": "Kab. Bantul", "kecamatan_nama": "Sewon" },
                "Kegiatan": { "id": 3, "nama_kegiatan": "Rapat bulanan" }
            },
            {
                "id": 3,
                "tgl_lapor": "2024-03-15",
                "kas": { "id": 4, "nama_transaksi": "Iuran", "jenis_transaksi": "Pemasukan", "total_transaksi": 50000 }
            },
            {
                "id": 4,
                "tgl_lapor": "2024-04-01",
                "KelompokDesa": { "id": 7, "nama": "Maju Jaya", "kabupaten_nama": "Kab. Sleman", "kecamatan_nama": "Mlati" }
            }
        ]))
        .unwrap()
    }

    fn ids(rows: &[&ReportItem]) -> Vec<u32> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_keyword_matches_nested_group_address() {
        let items = reports();
        let mut filter = FilterSpec::new();
        filter.set_keyword("sleman");
        // item 1 has no description or user, item 4 is a group registration
        assert_eq!(ids(&filter.apply(&items)), vec![1, 4]);
    }

    #[test]
    fn test_keyword_matches_formatted_amount_and_date() {
        let items = reports();
        let mut filter = FilterSpec::new();
        filter.set_keyword("Rp 50.000");
        assert_eq!(ids(&filter.apply(&items)), vec![3]);

        filter.set_keyword("02/03/2024");
        assert_eq!(ids(&filter.apply(&items)), vec![2]);
    }

    #[test]
    fn test_missing_group_excluded_by_district_facet() {
        let items = reports();
        let mut filter = FilterSpec::new();
        filter.toggle(ReportFacet::Kabupaten, "Kab. Sleman");
        assert_eq!(ids(&filter.apply(&items)), vec![1, 4]);

        filter.toggle(ReportFacet::Kabupaten, "Kab. Bantul");
        assert_eq!(ids(&filter.apply(&items)), vec![1, 2, 4]);

        filter.toggle(ReportFacet::Jenis, "Produk");
        assert_eq!(ids(&filter.apply(&items)), vec![1]);
    }

    #[test]
    fn test_district_selection_clears_narrower_facets() {
        let mut filter = FilterSpec::new();
        filter.toggle(ReportFacet::Kecamatan, "Depok");
        filter.toggle(ReportFacet::Kelompok, "Tani Makmur");
        filter.toggle(ReportFacet::Jenis, "Produk");

        filter.select_resetting(ReportFacet::Kabupaten, ["Kab. Bantul"], &REPORT_DISTRICT_NARROWER);
        assert!(filter.selected(ReportFacet::Kecamatan).map_or(true, |s| s.is_empty()));
        assert!(filter.selected(ReportFacet::Kelompok).map_or(true, |s| s.is_empty()));
        assert!(filter.is_selected(ReportFacet::Jenis, "Produk"));
        assert!(filter.is_selected(ReportFacet::Kabupaten, "Kab. Bantul"));
    }

    #[test]
    fn test_narrower_choices_stay_inside_district() {
        let items = reports();
        let mut filter = FilterSpec::new();
        filter.toggle_resetting(ReportFacet::Kabupaten, "Kab. Bantul", &REPORT_DISTRICT_NARROWER);
        assert_eq!(
            filter.options_within(&items, ReportFacet::Kecamatan, &REPORT_SUBDISTRICT_SCOPE),
            vec!["Sewon"]
        );
        assert_eq!(
            filter.options_within(&items, ReportFacet::Kelompok, &REPORT_GROUP_SCOPE),
            vec!["Sido Rukun"]
        );

        filter.toggle_resetting(ReportFacet::Kabupaten, "Kab. Bantul", &REPORT_DISTRICT_NARROWER);
        filter.toggle_resetting(ReportFacet::Kabupaten, "Kab. Sleman", &REPORT_DISTRICT_NARROWER);
        filter.toggle(ReportFacet::Kecamatan, "Mlati");
        assert_eq!(
            filter.options_within(&items, ReportFacet::Kelompok, &REPORT_GROUP_SCOPE),
            vec!["Maju Jaya"]
        );
    }

    #[test]
    fn test_server_district_change_drops_region_facets() {
        let items = reports();
        let mut state = ListState::new(SortSpec::descending(ReportSortKey::Tanggal), 10);
        state.refine(|f| {
            f.toggle(ReportFacet::Kecamatan, "Depok");
            f.toggle(ReportFacet::Jenis, "Kegiatan");
        });
        assert!(state.rows(&items).is_empty());

        // the server now returns Bantul only, a Sleman kecamatan would hide everything
        state.refine(|f| f.clear_facets(&REPORT_REGION_FACETS));
        assert!(state.filter.selected(ReportFacet::Kecamatan).is_none());
        assert!(state.filter.is_selected(ReportFacet::Jenis, "Kegiatan"));
        assert_eq!(ids(&state.rows(&items)), vec![2]);

        let mut groups = FilterSpec::new();
        groups.toggle(GroupFacet::Kecamatan, "Depok");
        groups.toggle(GroupFacet::Status, "pending");
        groups.clear_facets(&GROUP_REGION_FACETS);
        assert!(groups.selected(GroupFacet::Kecamatan).is_none());
        assert!(groups.is_selected(GroupFacet::Status, "pending"));
    }

    #[test]
    fn test_report_facet_options() {
        let items = reports();
        assert_eq!(facet_options(&items, ReportFacet::Kabupaten), vec!["Kab. Bantul", "Kab. Sleman"]);
        assert_eq!(
            facet_options(&items, ReportFacet::Kelompok),
            vec!["Maju Jaya", "Sido Rukun", "Tani Makmur"]
        );
    }

    #[test]
    fn test_group_list_state() {
        let groups: Vec<VillageGroup> = serde_json::from_value(json!([
            { "id": 1, "nama": "Tani Makmur", "kabupaten_nama": "Kab. Sleman", "status": "pending", "jumlah_anggota_awal": 12 },
            { "id": 2, "nama": "sido rukun", "kabupaten_nama": "Kab. Bantul", "status": "disetujui", "jumlah_anggota_awal": 8 },
            { "id": 3, "nama": "Amanah", "status": "pending" }
        ]))
        .unwrap();

        let mut state = ListState::new(SortSpec::ascending(GroupSortKey::Nama), 10);
        let names: Vec<_> = state.rows(&groups).iter().map(|g| g.nama.clone()).collect();
        assert_eq!(names, vec!["Amanah", "sido rukun", "Tani Makmur"]);

        state.sort_by(GroupSortKey::Anggota);
        let order: Vec<_> = state.rows(&groups).iter().map(|g| g.id).collect();
        assert_eq!(order, vec![3, 2, 1]);

        state.refine(|f| f.toggle(GroupFacet::Status, "pending"));
        let page = state.page(&groups);
        assert_eq!(page.filtered_total, 2);
        assert_eq!(page.rows.iter().map(|g| g.id).collect::<Vec<_>>(), vec![3, 1]);
    }

    #[test]
    fn test_cash_and_activity_facets() {
        let entries: Vec<CashEntry> = serde_json::from_value(json!([
            { "id": 1, "nama_transaksi": "Iuran", "jenis_transaksi": "Pemasukan", "total_transaksi": 200000 },
            { "id": 2, "nama_transaksi": "Bahan", "jenis_transaksi": "Pengeluaran", "total_transaksi": 75000 }
        ]))
        .unwrap();
        let mut filter = FilterSpec::new();
        filter.toggle(CashFacet::Jenis, "Pengeluaran");
        assert_eq!(filter.apply(&entries).len(), 1);

        let activity: Activity = serde_json::from_value(json!({
            "id": 1, "nama_kegiatan": "Pelatihan", "tanggal": "2024-03-09"
        }))
        .unwrap();
        assert_eq!(activity.facet_value(ActivityFacet::Bulan).as_deref(), Some("2024-03"));
    }

    #[test]
    fn test_product_owner_prefers_linked_member() {
        let product: Product = serde_json::from_value(json!({
            "id": 1, "nama": "Batik", "pelaku_usaha": "Bu Sri",
            "Anggota": { "id": 4, "nama": "Sri Wahyuni" }
        }))
        .unwrap();
        assert_eq!(product.pemilik(), Some("Sri Wahyuni"));
        assert_eq!(product.facet_value(ProductFacet::PelakuUsaha).as_deref(), Some("Sri Wahyuni"));
    }
}
