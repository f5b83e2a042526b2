//! Group Mutation Flows
//!
//! The confirmation modal on the group list and detail screens: approve or
//! reject, edit the reviewer note, or delete. Each proposal maps to exactly
//! one backend request.

use list_view::SubmitFlow;

use crate::api::{self, ApiClient, ApiRequest};
use crate::error::ApiResult;
use crate::models::{GroupStatus, VillageGroup};

/// Group the modal acts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTarget {
    pub id: u32,
    pub nama: String,
}

impl From<&VillageGroup> for GroupTarget {
    fn from(group: &VillageGroup) -> Self {
        Self {
            id: group.id,
            nama: group.nama.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupMutation {
    Status(GroupStatus),
    Catatan(String),
    Delete,
}

/// Which form the modal shows, independent of the value being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Status,
    Catatan,
    Delete,
}

impl GroupMutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            GroupMutation::Status(_) => MutationKind::Status,
            GroupMutation::Catatan(_) => MutationKind::Catatan,
            GroupMutation::Delete => MutationKind::Delete,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            GroupMutation::Status(_) => "Ubah Status",
            GroupMutation::Catatan(_) => "Catatan Peninjau",
            GroupMutation::Delete => "Hapus Kelompok",
        }
    }

    /// Toast shown after the server accepts the change
    pub fn success_message(&self, target: &GroupTarget) -> String {
        match self {
            GroupMutation::Status(status) => {
                format!("Status {} diubah menjadi {}", target.nama, status.label())
            }
            GroupMutation::Catatan(_) => format!("Catatan {} disimpan", target.nama),
            GroupMutation::Delete => format!("{} dihapus", target.nama),
        }
    }
}

pub type GroupFlow = SubmitFlow<GroupTarget, GroupMutation>;

pub fn mutation_request(target: &GroupTarget, mutation: &GroupMutation) -> ApiResult<ApiRequest> {
    let id = api::require_id(Some(target.id), "kelompok")?;
    Ok(match mutation {
        GroupMutation::Status(status) => api::update_status_request(id, *status),
        GroupMutation::Catatan(catatan) => api::update_note_request(id, catatan.trim()),
        GroupMutation::Delete => api::delete_group_request(id),
    })
}

/// Send a confirmed proposal
pub async fn submit(api: &ApiClient, target: &GroupTarget, mutation: &GroupMutation) -> ApiResult<()> {
    let request = mutation_request(target, mutation)?;
    log::info!("[GroupFlow] {} on kelompok {}", mutation.title(), target.id);
    api.send_unit(&request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{check_status, Method};
    use crate::error::ApiError;
    use list_view::FlowOutcome;
    use serde_json::json;

    fn target() -> GroupTarget {
        GroupTarget { id: 5, nama: "Tani Makmur".into() }
    }

    #[test]
    fn test_approve_issues_single_status_patch() {
        let mut flow = GroupFlow::default();
        assert!(flow.open(target(), GroupMutation::Status(GroupStatus::Disetujui)));

        let (target, mutation) = flow.confirm().unwrap();
        let request = mutation_request(&target, &mutation).unwrap();
        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.path, "/kelompok/5/status");
        assert_eq!(request.body, Some(json!({ "status": "disetujui" })));

        // a second confirm while submitting does not produce another request
        assert!(flow.confirm().is_none());

        assert_eq!(flow.resolve(check_status(200, "").map_err(|e| e.to_string())), Some(FlowOutcome::Completed));
        assert!(!flow.is_open());
    }

    #[test]
    fn test_server_error_keeps_modal_open_with_message() {
        let mut flow = GroupFlow::default();
        flow.open(target(), GroupMutation::Status(GroupStatus::Ditolak));
        flow.confirm();

        let result = check_status(500, r#"{"error":"Gagal memperbarui status"}"#).map_err(|e| e.to_string());
        assert_eq!(flow.resolve(result), Some(FlowOutcome::Failed));
        assert!(flow.is_open());
        assert!(!flow.is_busy());
        assert_eq!(flow.error(), Some("Gagal memperbarui status"));
        assert_eq!(flow.value(), Some(&GroupMutation::Status(GroupStatus::Ditolak)));
    }

    #[test]
    fn test_note_and_delete_requests() {
        let request = mutation_request(&target(), &GroupMutation::Catatan("  Lengkapi AD/ART ".into())).unwrap();
        assert_eq!(request.path, "/kelompok/5/catatan");
        assert_eq!(request.body, Some(json!({ "catatan": "Lengkapi AD/ART" })));

        let request = mutation_request(&target(), &GroupMutation::Delete).unwrap();
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.path, "/kelompok/5");
    }

    #[test]
    fn test_missing_id_rejected_before_request() {
        let target = GroupTarget { id: 0, nama: String::new() };
        assert!(matches!(
            mutation_request(&target, &GroupMutation::Delete),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn test_success_messages() {
        let message = GroupMutation::Status(GroupStatus::Disetujui).success_message(&target());
        assert_eq!(message, "Status Tani Makmur diubah menjadi Disetujui");
    }
}
