//! Group Component Endpoints
//!
//! `/komponen-{resource}/:groupId/{resource}` collections and their
//! item-level deletes.

use serde::de::DeserializeOwned;

use super::{ApiClient, ApiRequest};
use crate::error::ApiResult;
use crate::models::ComponentKind;

pub fn component_path(kind: ComponentKind, group_id: u32) -> String {
    format!("/komponen-{0}/{1}/{0}", kind.resource(), group_id)
}

pub fn list_component_request(kind: ComponentKind, group_id: u32) -> ApiRequest {
    ApiRequest::get(component_path(kind, group_id))
}

pub fn delete_component_item_request(kind: ComponentKind, group_id: u32, item_id: u32) -> ApiRequest {
    ApiRequest::delete(format!("{}/{}", component_path(kind, group_id), item_id))
}

/// List one component collection; `T` must match `kind`
pub async fn list_component<T: DeserializeOwned>(
    api: &ApiClient,
    kind: ComponentKind,
    group_id: u32,
) -> ApiResult<Vec<T>> {
    api.send(&list_component_request(kind, group_id)).await
}

pub async fn delete_component_item(
    api: &ApiClient,
    kind: ComponentKind,
    group_id: u32,
    item_id: u32,
) -> ApiResult<()> {
    api.send_unit(&delete_component_item_request(kind, group_id, item_id))
        .await
}
