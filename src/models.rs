//! Frontend Models
//!
//! Data structures matching backend entities. The server is authoritative;
//! these are transient copies refreshed by refetching.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Anything listed in a table with a stable id
pub trait Entity {
    fn id(&self) -> u32;
}

// ========================
// Village groups
// ========================

/// Approval status of a village group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GroupStatus {
    #[default]
    Pending,
    Disetujui,
    Ditolak,
}

impl GroupStatus {
    pub const ALL: [GroupStatus; 3] = [GroupStatus::Pending, GroupStatus::Disetujui, GroupStatus::Ditolak];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupStatus::Pending => "pending",
            GroupStatus::Disetujui => "disetujui",
            GroupStatus::Ditolak => "ditolak",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GroupStatus::Pending => "Menunggu",
            GroupStatus::Disetujui => "Disetujui",
            GroupStatus::Ditolak => "Ditolak",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            GroupStatus::Pending => "badge badge-pending",
            GroupStatus::Disetujui => "badge badge-approved",
            GroupStatus::Ditolak => "badge badge-rejected",
        }
    }
}

/// Development category assigned by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kategori {
    Tumbuh,
    Berkembang,
    Maju,
}

impl Kategori {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kategori::Tumbuh => "Tumbuh",
            Kategori::Berkembang => "Berkembang",
            Kategori::Maju => "Maju",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VillageGroup {
    pub id: u32,
    pub nama: String,
    #[serde(default, alias = "kabupaten")]
    pub kabupaten_nama: Option<String>,
    #[serde(default, alias = "kecamatan")]
    pub kecamatan_nama: Option<String>,
    #[serde(default, alias = "kelurahan")]
    pub kelurahan_nama: Option<String>,
    #[serde(default, deserialize_with = "de::optional_date")]
    pub tanggal_pembentukan: Option<NaiveDate>,
    #[serde(default)]
    pub jumlah_anggota_awal: Option<i64>,
    #[serde(default)]
    pub jumlah_hibah_diterima: Option<i64>,
    #[serde(default)]
    pub status: GroupStatus,
    #[serde(default, deserialize_with = "de::optional_kategori")]
    pub kategori: Option<Kategori>,
    #[serde(default)]
    pub catatan: Option<String>,
}

impl VillageGroup {
    /// "Kel. X, Kec. Y, Kab. Z" style address, skipping empty parts
    pub fn alamat(&self) -> String {
        [&self.kelurahan_nama, &self.kecamatan_nama, &self.kabupaten_nama]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ========================
// Group components
// ========================

/// Member certification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sertifikasi {
    #[serde(rename = "NIB")]
    Nib,
    #[serde(rename = "PIRT")]
    Pirt,
    Halal,
    #[serde(rename = "BPOM")]
    Bpom,
}

impl Sertifikasi {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sertifikasi::Nib => "NIB",
            Sertifikasi::Pirt => "PIRT",
            Sertifikasi::Halal => "Halal",
            Sertifikasi::Bpom => "BPOM",
        }
    }
}

/// Anggota
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: u32,
    pub nama: String,
    #[serde(default)]
    pub jabatan: Option<String>,
    #[serde(default)]
    pub nohp: Option<String>,
    #[serde(default)]
    pub usaha: Option<String>,
    #[serde(default, deserialize_with = "de::optional_sertifikasi")]
    pub sertifikasi: Option<Sertifikasi>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JenisTransaksi {
    Pemasukan,
    Pengeluaran,
}

impl JenisTransaksi {
    pub fn as_str(&self) -> &'static str {
        match self {
            JenisTransaksi::Pemasukan => "Pemasukan",
            JenisTransaksi::Pengeluaran => "Pengeluaran",
        }
    }
}

/// Kas ledger line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashEntry {
    pub id: u32,
    pub nama_transaksi: String,
    pub jenis_transaksi: JenisTransaksi,
    #[serde(default)]
    pub total_transaksi: i64,
    #[serde(default, deserialize_with = "de::optional_date")]
    pub tgl_transaksi: Option<NaiveDate>,
    #[serde(default)]
    pub file: Option<String>,
}

/// Income, expense and balance over a set of ledger lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CashSummary {
    pub pemasukan: i64,
    pub pengeluaran: i64,
}

impl CashSummary {
    pub fn of<'a>(entries: impl IntoIterator<Item = &'a CashEntry>) -> Self {
        entries.into_iter().fold(Self::default(), |mut sum, entry| {
            match entry.jenis_transaksi {
                JenisTransaksi::Pemasukan => sum.pemasukan += entry.total_transaksi,
                JenisTransaksi::Pengeluaran => sum.pengeluaran += entry.total_transaksi,
            }
            sum
        })
    }

    pub fn saldo(&self) -> i64 {
        self.pemasukan - self.pengeluaran
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityPhoto {
    pub id: u32,
    pub gambar: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default, rename = "createdAt", deserialize_with = "de::optional_date")]
    pub created_at: Option<NaiveDate>,
}

/// Kegiatan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: u32,
    pub nama_kegiatan: String,
    #[serde(default, deserialize_with = "de::optional_date")]
    pub tanggal: Option<NaiveDate>,
    #[serde(default)]
    pub uraian: Option<String>,
    #[serde(default)]
    pub file_materi: Option<String>,
    #[serde(default)]
    pub file_notulensi: Option<String>,
    #[serde(default, rename = "FotoKegiatan")]
    pub foto: Vec<ActivityPhoto>,
}

/// Produk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub nama: String,
    #[serde(default)]
    pub harga_awal: Option<i64>,
    #[serde(default)]
    pub harga_akhir: Option<i64>,
    #[serde(default)]
    pub deskripsi: Option<String>,
    #[serde(default)]
    pub pelaku_usaha: Option<String>,
    #[serde(default)]
    pub foto: Option<String>,
    #[serde(default, rename = "Anggota")]
    pub anggota: Option<Member>,
}

/// Laporan (uploaded report file)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: u32,
    pub nama_laporan: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default, rename = "createdAt", deserialize_with = "de::optional_date")]
    pub created_at: Option<NaiveDate>,
}

/// The five component collections hanging off a group.
/// Also the tabs of the group detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComponentKind {
    #[default]
    Anggota,
    Produk,
    Kas,
    Kegiatan,
    Laporan,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 5] = [
        ComponentKind::Anggota,
        ComponentKind::Produk,
        ComponentKind::Kas,
        ComponentKind::Kegiatan,
        ComponentKind::Laporan,
    ];

    /// Path segment of the collection, also the `type` of bulk deletes
    pub fn resource(&self) -> &'static str {
        match self {
            ComponentKind::Anggota => "anggota",
            ComponentKind::Produk => "produk",
            ComponentKind::Kas => "kas",
            ComponentKind::Kegiatan => "kegiatan",
            ComponentKind::Laporan => "laporan",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComponentKind::Anggota => "Anggota",
            ComponentKind::Produk => "Produk",
            ComponentKind::Kas => "Kas",
            ComponentKind::Kegiatan => "Kegiatan",
            ComponentKind::Laporan => "Laporan",
        }
    }

    pub fn from_resource(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.resource() == value)
    }
}

// ========================
// Pelaporan feed
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default, alias = "nama")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Which component a report item describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Produk,
    Anggota,
    Kas,
    Laporan,
    Kegiatan,
    KelompokDesa,
}

impl ReportKind {
    pub const ALL: [ReportKind; 6] = [
        ReportKind::Produk,
        ReportKind::Anggota,
        ReportKind::Kas,
        ReportKind::Laporan,
        ReportKind::Kegiatan,
        ReportKind::KelompokDesa,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReportKind::Produk => "Produk",
            ReportKind::Anggota => "Anggota",
            ReportKind::Kas => "Kas",
            ReportKind::Laporan => "Laporan",
            ReportKind::Kegiatan => "Kegiatan",
            ReportKind::KelompokDesa => "Kelompok Desa",
        }
    }

    /// Detail tab opened when the item is clicked; `None` opens the group overview
    pub fn detail_tab(&self) -> Option<ComponentKind> {
        match self {
            ReportKind::Produk => Some(ComponentKind::Produk),
            ReportKind::Anggota => Some(ComponentKind::Anggota),
            ReportKind::Kas => Some(ComponentKind::Kas),
            ReportKind::Laporan => Some(ComponentKind::Laporan),
            ReportKind::Kegiatan => Some(ComponentKind::Kegiatan),
            ReportKind::KelompokDesa => None,
        }
    }
}

/// Exactly one populated variant of a report item
#[derive(Debug, Clone, PartialEq)]
pub enum ReportPayload {
    Produk(Product),
    Anggota(Member),
    Kas(CashEntry),
    Laporan(Report),
    Kegiatan(Activity),
    KelompokDesa(VillageGroup),
}

impl ReportPayload {
    pub fn kind(&self) -> ReportKind {
        match self {
            ReportPayload::Produk(_) => ReportKind::Produk,
            ReportPayload::Anggota(_) => ReportKind::Anggota,
            ReportPayload::Kas(_) => ReportKind::Kas,
            ReportPayload::Laporan(_) => ReportKind::Laporan,
            ReportPayload::Kegiatan(_) => ReportKind::Kegiatan,
            ReportPayload::KelompokDesa(_) => ReportKind::KelompokDesa,
        }
    }

    /// Headline of the payload
    pub fn title(&self) -> &str {
        match self {
            ReportPayload::Produk(p) => &p.nama,
            ReportPayload::Anggota(m) => &m.nama,
            ReportPayload::Kas(k) => &k.nama_transaksi,
            ReportPayload::Laporan(l) => &l.nama_laporan,
            ReportPayload::Kegiatan(k) => &k.nama_kegiatan,
            ReportPayload::KelompokDesa(g) => &g.nama,
        }
    }
}

/// Pelaporan item
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawReportItem")]
pub struct ReportItem {
    pub id: u32,
    pub deskripsi: Option<String>,
    pub tgl_lapor: Option<NaiveDate>,
    pub user: Option<User>,
    pub kelompok_id: Option<u32>,
    pub kelompok: Option<VillageGroup>,
    pub payload: ReportPayload,
}

impl ReportItem {
    pub fn kind(&self) -> ReportKind {
        self.payload.kind()
    }

    /// Group the item belongs to; a group registration item is its own group
    pub fn group(&self) -> Option<&VillageGroup> {
        match (&self.kelompok, &self.payload) {
            (Some(group), _) => Some(group),
            (None, ReportPayload::KelompokDesa(group)) => Some(group),
            _ => None,
        }
    }

    pub fn group_id(&self) -> Option<u32> {
        self.kelompok_id.or_else(|| self.group().map(|g| g.id))
    }
}

/// Wire shape: six optional payload fields
#[derive(Deserialize)]
struct RawReportItem {
    id: u32,
    #[serde(default)]
    deskripsi: Option<String>,
    #[serde(default, deserialize_with = "de::optional_date")]
    tgl_lapor: Option<NaiveDate>,
    #[serde(default, rename = "User")]
    user: Option<User>,
    #[serde(default, rename = "kelompokId")]
    kelompok_id: Option<u32>,
    #[serde(default, rename = "Kelompok")]
    kelompok: Option<VillageGroup>,
    #[serde(default, rename = "Produk")]
    produk: Option<Product>,
    #[serde(default, rename = "Anggota")]
    anggota: Option<Member>,
    #[serde(default)]
    kas: Option<CashEntry>,
    #[serde(default, rename = "Laporan")]
    laporan: Option<Report>,
    #[serde(default, rename = "Kegiatan")]
    kegiatan: Option<Activity>,
    #[serde(default, rename = "KelompokDesa")]
    kelompok_desa: Option<VillageGroup>,
}

impl TryFrom<RawReportItem> for ReportItem {
    type Error = String;

    fn try_from(raw: RawReportItem) -> Result<Self, Self::Error> {
        let mut payloads: Vec<ReportPayload> = Vec::with_capacity(1);
        payloads.extend(raw.produk.map(ReportPayload::Produk));
        payloads.extend(raw.anggota.map(ReportPayload::Anggota));
        payloads.extend(raw.kas.map(ReportPayload::Kas));
        payloads.extend(raw.laporan.map(ReportPayload::Laporan));
        payloads.extend(raw.kegiatan.map(ReportPayload::Kegiatan));
        payloads.extend(raw.kelompok_desa.map(ReportPayload::KelompokDesa));

        if payloads.len() != 1 {
            return Err(format!(
                "pelaporan {} must carry exactly one payload, found {}",
                raw.id,
                payloads.len()
            ));
        }
        let payload = payloads.remove(0);

        Ok(ReportItem {
            id: raw.id,
            deskripsi: raw.deskripsi,
            tgl_lapor: raw.tgl_lapor,
            user: raw.user,
            kelompok_id: raw.kelompok_id,
            kelompok: raw.kelompok,
            payload,
        })
    }
}

// ========================
// Reference data
// ========================

/// Kabupaten / kecamatan / kelurahan row from the static JSON files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,
    #[serde(alias = "name")]
    pub nama: String,
}

impl Entity for VillageGroup {
    fn id(&self) -> u32 {
        self.id
    }
}

impl Entity for Member {
    fn id(&self) -> u32 {
        self.id
    }
}

impl Entity for CashEntry {
    fn id(&self) -> u32 {
        self.id
    }
}

impl Entity for Activity {
    fn id(&self) -> u32 {
        self.id
    }
}

impl Entity for Product {
    fn id(&self) -> u32 {
        self.id
    }
}

impl Entity for Report {
    fn id(&self) -> u32 {
        self.id
    }
}

impl Entity for ReportItem {
    fn id(&self) -> u32 {
        self.id
    }
}

/// Lenient field deserializers for the backend's loosely typed JSON
mod de {
    use chrono::{DateTime, FixedOffset, NaiveDate};
    use serde::{Deserialize, Deserializer};

    use super::{Kategori, Sertifikasi};

    /// Western Indonesia Time, used to turn timestamps into calendar dates
    const WIB_OFFSET_SECS: i32 = 7 * 3600;

    pub fn parse_date(value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
            let wib = FixedOffset::east_opt(WIB_OFFSET_SECS)?;
            return Some(timestamp.with_timezone(&wib).date_naive());
        }
        NaiveDate::parse_from_str(value.get(..10)?, "%Y-%m-%d").ok()
    }

    pub fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse_date))
    }

    pub fn optional_kategori<'de, D>(deserializer: D) -> Result<Option<Kategori>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(match raw.as_deref().map(str::trim) {
            Some("Tumbuh") => Some(Kategori::Tumbuh),
            Some("Berkembang") => Some(Kategori::Berkembang),
            Some("Maju") => Some(Kategori::Maju),
            _ => None,
        })
    }

    pub fn optional_sertifikasi<'de, D>(deserializer: D) -> Result<Option<Sertifikasi>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(match raw.as_deref().map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("NIB") => Some(Sertifikasi::Nib),
            Some(s) if s.eq_ignore_ascii_case("PIRT") => Some(Sertifikasi::Pirt),
            Some(s) if s.eq_ignore_ascii_case("Halal") => Some(Sertifikasi::Halal),
            Some(s) if s.eq_ignore_ascii_case("BPOM") => Some(Sertifikasi::Bpom),
            _ => None,
        })
    }

    pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Id {
            Text(String),
            Number(i64),
        }
        Ok(match Id::deserialize(deserializer)? {
            Id::Text(text) => text,
            Id::Number(number) => number.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::de::parse_date;
    use serde_json::json;

    #[test]
    fn test_village_group_defaults_and_aliases() {
        let group: VillageGroup = serde_json::from_value(json!({
            "id": 5,
            "nama": "Kelompok A",
            "kabupaten": "Sleman",
            "kecamatan_nama": "Depok",
            "tanggal_pembentukan": "2023-08-17T00:00:00.000Z",
            "status": "disetujui",
            "kategori": ""
        }))
        .unwrap();

        assert_eq!(group.kabupaten_nama.as_deref(), Some("Sleman"));
        assert_eq!(group.status, GroupStatus::Disetujui);
        assert_eq!(group.kategori, None);
        assert_eq!(group.tanggal_pembentukan, NaiveDate::from_ymd_opt(2023, 8, 17));
        assert_eq!(group.alamat(), "Depok, Sleman");
    }

    #[test]
    fn test_timestamps_resolve_to_wib_date() {
        assert_eq!(parse_date("2024-01-05T17:30:00.000Z"), NaiveDate::from_ymd_opt(2024, 1, 6));
        assert_eq!(parse_date("2024-01-05"), NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(parse_date("kemarin"), None);
    }

    #[test]
    fn test_report_item_single_payload() {
        let item: ReportItem = serde_json::from_value(json!({
            "id": 9,
            "deskripsi": "Pemasukan penjualan",
            "tgl_lapor": "2024-03-01",
            "User": { "id": 2, "name": "Admin Sleman" },
            "kelompokId": 5,
            "kas": {
                "id": 1,
                "nama_transaksi": "Penjualan keripik",
                "jenis_transaksi": "Pemasukan",
                "total_transaksi": 150000
            },
            "Produk": null
        }))
        .unwrap();

        assert_eq!(item.kind(), ReportKind::Kas);
        assert_eq!(item.payload.title(), "Penjualan keripik");
        assert_eq!(item.group_id(), Some(5));
        assert_eq!(item.kind().detail_tab(), Some(ComponentKind::Kas));
    }

    #[test]
    fn test_report_item_rejects_zero_or_many_payloads() {
        let none = serde_json::from_value::<ReportItem>(json!({ "id": 1 }));
        assert!(none.is_err());

        let many = serde_json::from_value::<ReportItem>(json!({
            "id": 2,
            "Laporan": { "id": 1, "nama_laporan": "Q1" },
            "Anggota": { "id": 3, "nama": "Siti" }
        }));
        let message = many.unwrap_err().to_string();
        assert!(message.contains("exactly one payload"));
    }

    #[test]
    fn test_group_registration_item_is_its_own_group() {
        let item: ReportItem = serde_json::from_value(json!({
            "id": 3,
            "KelompokDesa": { "id": 12, "nama": "Maju Bersama", "kabupaten_nama": "Kab. Bantul" }
        }))
        .unwrap();
        assert_eq!(item.group().map(|g| g.id), Some(12));
        assert_eq!(item.group_id(), Some(12));
        assert_eq!(item.kind().detail_tab(), None);
    }

    #[test]
    fn test_member_sertifikasi_is_lenient() {
        let member: Member = serde_json::from_value(json!({
            "id": 1, "nama": "Siti", "sertifikasi": "pirt"
        }))
        .unwrap();
        assert_eq!(member.sertifikasi, Some(Sertifikasi::Pirt));

        let member: Member = serde_json::from_value(json!({
            "id": 2, "nama": "Budi", "sertifikasi": "Tidak ada"
        }))
        .unwrap();
        assert_eq!(member.sertifikasi, None);
    }

    #[test]
    fn test_cash_summary() {
        let entries: Vec<CashEntry> = serde_json::from_value(json!([
            { "id": 1, "nama_transaksi": "Iuran", "jenis_transaksi": "Pemasukan", "total_transaksi": 200000 },
            { "id": 2, "nama_transaksi": "Bahan baku", "jenis_transaksi": "Pengeluaran", "total_transaksi": 75000 },
            { "id": 3, "nama_transaksi": "Penjualan", "jenis_transaksi": "Pemasukan", "total_transaksi": 50000 }
        ]))
        .unwrap();
        let summary = CashSummary::of(&entries);
        assert_eq!(summary.pemasukan, 250_000);
        assert_eq!(summary.pengeluaran, 75_000);
        assert_eq!(summary.saldo(), 175_000);
    }

    #[test]
    fn test_region_numeric_id() {
        let region: Region = serde_json::from_value(json!({ "id": 3404, "name": "Kab. Sleman" })).unwrap();
        assert_eq!(region.id, "3404");
        assert_eq!(region.nama, "Kab. Sleman");
    }
}
