//! Report Feed Endpoint

use chrono::NaiveDate;
use serde_json::Value;

use super::{ApiClient, ApiRequest};
use crate::error::{ApiError, ApiResult};
use crate::models::ReportItem;

/// Server-side narrowing of the report feed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportQuery {
    pub kabupaten: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ReportQuery {
    pub fn validate(&self) -> ApiResult<()> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if start > end => Err(ApiError::Validation(
                "Tanggal mulai harus sebelum tanggal akhir".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

pub fn list_reports_request(query: &ReportQuery) -> ApiResult<ApiRequest> {
    query.validate()?;
    let iso = |d: NaiveDate| d.format("%Y-%m-%d").to_string();
    Ok(ApiRequest::get("/pelaporan/all")
        .with_query("kabupaten", query.kabupaten.as_deref())
        .with_query("startDate", query.start_date.map(iso))
        .with_query("endDate", query.end_date.map(iso)))
}

/// Decode feed entries one by one; an entry that does not carry exactly one
/// payload is logged and skipped instead of failing the whole feed.
pub fn decode_report_items(entries: Vec<Value>) -> Vec<ReportItem> {
    entries
        .into_iter()
        .filter_map(|entry| {
            let id = entry.get("id").cloned().unwrap_or(Value::Null);
            match serde_json::from_value::<ReportItem>(entry) {
                Ok(item) => Some(item),
                Err(e) => {
                    log::warn!("[Pelaporan] Skipping report {}: {}", id, e);
                    None
                }
            }
        })
        .collect()
}

pub async fn list_reports(api: &ApiClient, query: &ReportQuery) -> ApiResult<Vec<ReportItem>> {
    let request = list_reports_request(query)?;
    let entries: Vec<Value> = api.send(&request).await?;
    Ok(decode_report_items(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_query_params() {
        let query = ReportQuery {
            kabupaten: Some("Sleman".into()),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 30),
        };
        let request = list_reports_request(&query).unwrap();
        assert_eq!(request.path, "/pelaporan/all");
        assert_eq!(
            request.query,
            vec![
                ("kabupaten", "Sleman".to_string()),
                ("startDate", "2024-01-01".to_string()),
                ("endDate", "2024-06-30".to_string()),
            ]
        );

        assert!(list_reports_request(&ReportQuery::default()).unwrap().query.is_empty());
    }

    #[test]
    fn test_invalid_entry_does_not_blank_feed() {
        let entries = vec![
            json!({ "id": 1, "Produk": { "id": 8, "nama": "Keripik" } }),
            json!({ "id": 2 }),
            json!({ "id": 3, "Produk": { "id": 9, "nama": "Batik" }, "kas": { "id": 4, "nama_transaksi": "Iuran", "jenis_transaksi": "Pemasukan", "total_transaksi": 5000 } }),
            json!({ "id": 4, "Anggota": { "id": 3, "nama": "Siti" } }),
        ];
        let items = decode_report_items(entries);
        assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 4]);
    }

    #[test]
    fn test_inverted_range_rejected_before_request() {
        let query = ReportQuery {
            kabupaten: None,
            start_date: NaiveDate::from_ymd_opt(2024, 6, 30),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 1),
        };
        assert!(matches!(list_reports_request(&query), Err(ApiError::Validation(_))));
    }
}
