//! Table Exports
//!
//! Turns the rows currently shown by a list screen into an Excel workbook,
//! a CSV or a PDF table, and hands the bytes to the browser as a download.

use chrono::NaiveDate;
use genpdf::{elements, style, Element};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::format;
use crate::models::{Activity, CashEntry, Member, Product, Report, ReportItem, VillageGroup};

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const CSV_MIME: &str = "text/csv;charset=utf-8";
pub const PDF_MIME: &str = "application/pdf";
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const SHEET_NAME: &str = "Data";

const FONT_REGULAR: &str = "LiberationSans-Regular.ttf";
const FONT_BOLD: &str = "LiberationSans-Bold.ttf";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Gagal menyusun Excel: {0}")]
    Xlsx(String),

    #[error("Gagal menyusun CSV: {0}")]
    Csv(String),

    #[error("Gagal menyusun PDF: {0}")]
    Pdf(String),

    #[error("Gagal mengambil berkas: {0}")]
    Fetch(#[from] ApiError),

    #[error("Gagal mengunduh file: {0}")]
    Browser(String),
}

impl From<XlsxError> for ExportError {
    fn from(e: XlsxError) -> Self {
        ExportError::Xlsx(e.to_string())
    }
}

impl From<csv::Error> for ExportError {
    fn from(e: csv::Error) -> Self {
        ExportError::Csv(e.to_string())
    }
}

impl From<genpdf::error::Error> for ExportError {
    fn from(e: genpdf::error::Error) -> Self {
        ExportError::Pdf(e.to_string())
    }
}

impl From<wasm_bindgen::JsValue> for ExportError {
    fn from(e: wasm_bindgen::JsValue) -> Self {
        ExportError::Browser(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
    }
}

/// A row type that can be written to an export table
pub trait Exportable {
    fn headers() -> Vec<&'static str>;

    fn cells(&self) -> Vec<String>;

    /// Relative PDF column widths
    fn column_weights() -> Vec<usize> {
        vec![1; Self::headers().len()]
    }
}

// ========================
// Excel
// ========================

pub fn to_xlsx<T: Exportable>(rows: &[&T]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, heading) in T::headers().into_iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, heading, &header)?;
    }
    for (index, row) in rows.iter().enumerate() {
        for (col, cell) in row.cells().into_iter().enumerate() {
            sheet.write_string(index as u32 + 1, col as u16, cell)?;
        }
    }
    sheet.autofit();

    Ok(workbook.save_to_buffer()?)
}

// ========================
// CSV
// ========================

pub fn to_csv<T: Exportable>(rows: &[&T]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(UTF8_BOM.to_vec());
    writer.write_record(T::headers())?;
    for row in rows {
        writer.write_record(row.cells())?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.to_string()))
}

// ========================
// PDF
// ========================

/// TTF bytes used to lay out the PDF
#[derive(Clone)]
pub struct PdfFonts {
    pub regular: Vec<u8>,
    pub bold: Vec<u8>,
}

pub async fn fetch_fonts(api: &ApiClient) -> Result<PdfFonts, ExportError> {
    let config = api.config();
    let regular = api.fetch_bytes(&config.font_url(FONT_REGULAR)).await?;
    let bold = api.fetch_bytes(&config.font_url(FONT_BOLD)).await?;
    Ok(PdfFonts { regular, bold })
}

fn font_family(fonts: &PdfFonts) -> Result<genpdf::fonts::FontFamily<genpdf::fonts::FontData>, ExportError> {
    let regular = genpdf::fonts::FontData::new(fonts.regular.clone(), None)?;
    let bold = genpdf::fonts::FontData::new(fonts.bold.clone(), None)?;
    Ok(genpdf::fonts::FontFamily {
        italic: regular.clone(),
        bold_italic: bold.clone(),
        regular,
        bold,
    })
}

pub fn to_pdf<T: Exportable>(title: &str, rows: &[&T], fonts: &PdfFonts) -> Result<Vec<u8>, ExportError> {
    let mut doc = genpdf::Document::new(font_family(fonts)?);
    doc.set_title(title);
    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    doc.set_page_decorator(decorator);

    doc.push(elements::Paragraph::new(title).styled(style::Style::new().bold().with_font_size(14)));
    doc.push(elements::Paragraph::new(format!("{} data", rows.len())).styled(style::Style::new().with_font_size(9)));
    doc.push(elements::Break::new(1));

    let mut table = elements::TableLayout::new(T::column_weights());
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    let header_style = style::Style::new().bold().with_font_size(9);
    let mut header = table.row();
    for heading in T::headers() {
        header.push_element(elements::Paragraph::new(heading).styled(header_style));
    }
    header.push()?;

    let cell_style = style::Style::new().with_font_size(8);
    for row in rows {
        let mut line = table.row();
        for cell in row.cells() {
            line.push_element(elements::Paragraph::new(cell).styled(cell_style));
        }
        line.push()?;
    }
    doc.push(table);

    let mut buffer = Vec::new();
    doc.render(&mut buffer)?;
    Ok(buffer)
}

// ========================
// Browser download
// ========================

/// `Data Kelompok` + `csv` -> `data-kelompok-2024-03-01.csv`
pub fn export_file_name(title: &str, extension: &str, today: NaiveDate) -> String {
    let slug = title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    format!("{}-{}.{}", slug, today.format("%Y-%m-%d"), extension)
}

/// Last path segment of an uploaded file, used as the download name
pub fn file_name_of(path: &str) -> String {
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or("file")
        .to_string()
}

/// Offer `bytes` to the user as a file download
pub fn save_bytes(bytes: &[u8], file_name: &str, mime: &str) -> Result<(), ExportError> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;

    let url = Url::create_object_url_with_blob(&blob)?;
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ExportError::Browser("document tidak tersedia".to_string()))?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into()
        .map_err(|_| ExportError::Browser("elemen unduhan tidak valid".to_string()))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();
    Url::revoke_object_url(&url)?;

    log::info!("[Export] Saved {} ({} bytes)", file_name, bytes.len());
    Ok(())
}

// ========================
// Row definitions
// ========================

impl Exportable for VillageGroup {
    fn headers() -> Vec<&'static str> {
        vec!["Nama Kelompok", "Alamat", "Tanggal Pembentukan", "Anggota Awal", "Hibah Diterima", "Kategori", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.nama.clone(),
            format::text(Some(self.alamat().as_str())),
            format::optional_date(self.tanggal_pembentukan),
            self.jumlah_anggota_awal.map_or_else(|| "-".to_string(), |n| n.to_string()),
            format::optional_rupiah(self.jumlah_hibah_diterima),
            format::text(self.kategori.map(|k| k.as_str())),
            self.status.label().to_string(),
        ]
    }

    fn column_weights() -> Vec<usize> {
        vec![3, 4, 2, 1, 2, 2, 2]
    }
}

impl Exportable for ReportItem {
    fn headers() -> Vec<&'static str> {
        vec!["Tanggal", "Jenis", "Judul", "Kelompok", "Alamat", "Pelapor", "Deskripsi"]
    }

    fn cells(&self) -> Vec<String> {
        let group = self.group();
        vec![
            format::optional_date(self.tgl_lapor),
            self.kind().label().to_string(),
            self.payload.title().to_string(),
            format::text(group.map(|g| g.nama.as_str())),
            format::text(group.map(|g| g.alamat()).as_deref()),
            format::text(self.user.as_ref().map(|u| u.name.as_str())),
            format::text(self.deskripsi.as_deref()),
        ]
    }

    fn column_weights() -> Vec<usize> {
        vec![2, 2, 3, 3, 4, 2, 4]
    }
}

impl Exportable for Member {
    fn headers() -> Vec<&'static str> {
        vec!["Nama", "Jabatan", "No. HP", "Usaha", "Sertifikasi"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.nama.clone(),
            format::text(self.jabatan.as_deref()),
            format::text(self.nohp.as_deref()),
            format::text(self.usaha.as_deref()),
            format::text(self.sertifikasi.map(|s| s.as_str())),
        ]
    }
}

impl Exportable for Product {
    fn headers() -> Vec<&'static str> {
        vec!["Nama Produk", "Pelaku Usaha", "Harga Awal", "Harga Akhir", "Deskripsi"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.nama.clone(),
            format::text(self.pemilik()),
            format::optional_rupiah(self.harga_awal),
            format::optional_rupiah(self.harga_akhir),
            format::text(self.deskripsi.as_deref()),
        ]
    }

    fn column_weights() -> Vec<usize> {
        vec![3, 3, 2, 2, 4]
    }
}

impl Exportable for CashEntry {
    fn headers() -> Vec<&'static str> {
        vec!["Tanggal", "Nama Transaksi", "Jenis", "Total"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            format::optional_date(self.tgl_transaksi),
            self.nama_transaksi.clone(),
            self.jenis_transaksi.as_str().to_string(),
            format::rupiah(self.total_transaksi),
        ]
    }

    fn column_weights() -> Vec<usize> {
        vec![2, 4, 2, 2]
    }
}

impl Exportable for Activity {
    fn headers() -> Vec<&'static str> {
        vec!["Tanggal", "Nama Kegiatan", "Uraian", "Foto"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            format::optional_date(self.tanggal),
            self.nama_kegiatan.clone(),
            format::text(self.uraian.as_deref()),
            self.foto.len().to_string(),
        ]
    }

    fn column_weights() -> Vec<usize> {
        vec![2, 3, 5, 1]
    }
}

impl Exportable for Report {
    fn headers() -> Vec<&'static str> {
        vec!["Nama Laporan", "File", "Tanggal Unggah"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.nama_laporan.clone(),
            format::text(self.file.as_deref().map(|f| f.rsplit('/').next().unwrap_or(f))),
            format::optional_date(self.created_at),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_csv_has_bom_header_and_quoted_cells() {
        let entries: Vec<CashEntry> = serde_json::from_value(json!([
            { "id": 1, "nama_transaksi": "Iuran, Maret", "jenis_transaksi": "Pemasukan", "total_transaksi": 200000, "tgl_transaksi": "2024-03-01" },
            { "id": 2, "nama_transaksi": "Bahan", "jenis_transaksi": "Pengeluaran", "total_transaksi": 75000 }
        ]))
        .unwrap();
        let rows: Vec<&CashEntry> = entries.iter().collect();

        let bytes = to_csv(&rows).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Tanggal,Nama Transaksi,Jenis,Total");
        assert_eq!(lines[1], "01/03/2024,\"Iuran, Maret\",Pemasukan,Rp 200.000");
        assert_eq!(lines[2], "-,Bahan,Pengeluaran,Rp 75.000");
    }

    #[test]
    fn test_xlsx_is_a_zip_workbook() {
        let members: Vec<Member> = serde_json::from_value(json!([
            { "id": 1, "nama": "Siti", "jabatan": "Ketua" },
            { "id": 2, "nama": "Budi" }
        ]))
        .unwrap();
        let rows: Vec<&Member> = members.iter().collect();

        let bytes = to_xlsx(&rows).unwrap();
        assert!(bytes.starts_with(b"PK"));
        assert!(to_xlsx::<Member>(&[]).unwrap().starts_with(b"PK"));
    }

    #[test]
    fn test_empty_export_is_header_only() {
        let bytes = to_csv::<Member>(&[]).unwrap();
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(text.trim_end(), "Nama,Jabatan,No. HP,Usaha,Sertifikasi");
    }

    #[test]
    fn test_cells_match_headers() {
        let group: VillageGroup = serde_json::from_value(json!({ "id": 1, "nama": "Tani Makmur" })).unwrap();
        assert_eq!(group.cells().len(), VillageGroup::headers().len());
        assert_eq!(VillageGroup::column_weights().len(), VillageGroup::headers().len());
        assert_eq!(Report::column_weights(), vec![1, 1, 1]);
    }

    #[test]
    fn test_file_names() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(export_file_name("Data Kelompok Desa", "csv", today), "data-kelompok-desa-2024-03-01.csv");
        assert_eq!(file_name_of("uploads/laporan/Q1 2024.pdf"), "Q1 2024.pdf");
        assert_eq!(file_name_of(""), "file");
    }
}
