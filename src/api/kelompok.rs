//! Village Group Endpoints
//!
//! `/kelompok` listing, detail, status/note mutations and deletes.

use serde::Deserialize;
use serde_json::json;

use super::{decode, ApiClient, ApiRequest};
use crate::error::{ApiError, ApiResult};
use crate::models::{ComponentKind, GroupStatus, VillageGroup};

// ========================
// Requests
// ========================

pub fn list_groups_request(kabupaten: Option<&str>) -> ApiRequest {
    ApiRequest::get("/kelompok").with_query("kabupaten", kabupaten)
}

pub fn get_group_request(id: u32) -> ApiRequest {
    ApiRequest::get(format!("/kelompok/{}", id))
}

pub fn update_status_request(id: u32, status: GroupStatus) -> ApiRequest {
    ApiRequest::patch(
        format!("/kelompok/{}/status", id),
        json!({ "status": status.as_str() }),
    )
}

pub fn update_note_request(id: u32, catatan: &str) -> ApiRequest {
    ApiRequest::patch(
        format!("/kelompok/{}/catatan", id),
        json!({ "catatan": catatan }),
    )
}

pub fn delete_group_request(id: u32) -> ApiRequest {
    ApiRequest::delete(format!("/kelompok/{}", id))
}

pub fn delete_multiple_request(group_id: u32, kind: ComponentKind, ids: &[u32]) -> ApiResult<ApiRequest> {
    if ids.is_empty() {
        return Err(ApiError::Validation("Tidak ada data yang dipilih".to_string()));
    }
    Ok(ApiRequest::post(
        format!("/kelompok/{}/delete-multiple", group_id),
        json!({ "ids": ids, "type": kind.resource() }),
    ))
}

/// Optional counters some deployments return from `delete-multiple`
#[derive(Debug, Default, Deserialize)]
pub struct DeleteMultipleResponse {
    #[serde(default, alias = "count")]
    pub deleted: Option<usize>,
    #[serde(default)]
    pub failed: Option<usize>,
}

// ========================
// Commands
// ========================

pub async fn list_groups(api: &ApiClient, kabupaten: Option<&str>) -> ApiResult<Vec<VillageGroup>> {
    api.send(&list_groups_request(kabupaten)).await
}

pub async fn get_group(api: &ApiClient, id: u32) -> ApiResult<VillageGroup> {
    api.send(&get_group_request(id)).await
}

/// Delete several component rows in one call; returns (deleted, failed)
pub async fn delete_multiple(
    api: &ApiClient,
    group_id: u32,
    kind: ComponentKind,
    ids: &[u32],
) -> ApiResult<(usize, usize)> {
    let request = delete_multiple_request(group_id, kind, ids)?;
    let body = api.execute(&request).await?;
    // counters are optional, a 2xx without them means every id went through
    let response: DeleteMultipleResponse = decode(&body).unwrap_or_default();
    let deleted = response.deleted.unwrap_or(ids.len()).min(ids.len());
    let failed = response.failed.unwrap_or(ids.len() - deleted);
    Ok((deleted, failed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use serde_json::json;

    #[test]
    fn test_status_change_request_shape() {
        let request = update_status_request(5, GroupStatus::Disetujui);
        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.path, "/kelompok/5/status");
        assert_eq!(request.body, Some(json!({ "status": "disetujui" })));
    }

    #[test]
    fn test_note_request_shape() {
        let request = update_note_request(7, "Lengkapi dokumen AD/ART");
        assert_eq!(request.path, "/kelompok/7/catatan");
        assert_eq!(request.body, Some(json!({ "catatan": "Lengkapi dokumen AD/ART" })));
    }

    #[test]
    fn test_list_groups_district_query() {
        assert!(list_groups_request(None).query.is_empty());
        let request = list_groups_request(Some("Kab. Bantul"));
        assert_eq!(request.query, vec![("kabupaten", "Kab. Bantul".to_string())]);
    }

    #[test]
    fn test_delete_multiple_requires_selection() {
        assert!(matches!(
            delete_multiple_request(3, ComponentKind::Anggota, &[]),
            Err(ApiError::Validation(_))
        ));

        let request = delete_multiple_request(3, ComponentKind::Kas, &[4, 9]).unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/kelompok/3/delete-multiple");
        assert_eq!(request.body, Some(json!({ "ids": [4, 9], "type": "kas" })));
    }
}
