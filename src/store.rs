//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::models::{ComponentKind, ReportItem};

/// How long a toast stays on screen
const NOTIFICATION_TTL_MS: u32 = 4_000;
/// Older toasts are dropped beyond this many
const MAX_NOTIFICATIONS: usize = 4;

/// Which screen is shown
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AppView {
    #[default]
    Login,
    Groups,
    GroupDetail {
        id: u32,
        /// Tab to open; `None` falls back to the remembered tab
        tab: Option<ComponentKind>,
    },
    Reports,
}

impl AppView {
    /// Detail screen a report feed item points at
    pub fn for_report(item: &ReportItem) -> Option<AppView> {
        Some(AppView::GroupDetail {
            id: item.group_id()?,
            tab: item.kind().detail_tab(),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub fn class(&self) -> &'static str {
        match self {
            NotificationKind::Success => "toast toast-success",
            NotificationKind::Error => "toast toast-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Screen currently shown
    pub current_view: AppView,
    /// A token is stored in the session
    pub authenticated: bool,
    /// Visible toasts, oldest first
    pub notifications: Vec<Notification>,
    pub last_notification_id: u64,
}

impl AppState {
    pub fn new(authenticated: bool) -> Self {
        Self {
            current_view: if authenticated { AppView::Groups } else { AppView::Login },
            authenticated,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Append a toast, dropping the oldest ones past the cap
pub fn push_notification(list: &mut Vec<Notification>, notification: Notification) {
    list.push(notification);
    if list.len() > MAX_NOTIFICATIONS {
        let overflow = list.len() - MAX_NOTIFICATIONS;
        list.drain(..overflow);
    }
}

// ========================
// Store Helper Functions
// ========================

/// Show a toast that dismisses itself
pub fn store_notify(store: AppStore, kind: NotificationKind, message: impl Into<String>) {
    let message = message.into();
    match kind {
        NotificationKind::Error => log::warn!("[Toast] {}", message),
        _ => log::info!("[Toast] {}", message),
    }

    let id = store.last_notification_id().get_untracked() + 1;
    store.last_notification_id().set(id);
    push_notification(&mut store.notifications().write(), Notification { id, kind, message });

    spawn_local(async move {
        TimeoutFuture::new(NOTIFICATION_TTL_MS).await;
        store_dismiss(store, id);
    });
}

/// Remove a toast by ID
pub fn store_dismiss(store: AppStore, id: u64) {
    store.notifications().write().retain(|n| n.id != id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn notification(id: u64) -> Notification {
        Notification { id, kind: NotificationKind::Success, message: format!("pesan {}", id) }
    }

    #[test]
    fn test_notifications_are_capped_oldest_first() {
        let mut list = Vec::new();
        for id in 1..=6 {
            push_notification(&mut list, notification(id));
        }
        assert_eq!(list.iter().map(|n| n.id).collect::<Vec<_>>(), vec![3, 4, 5, 6]);
    }

    #[test]
    fn test_initial_view_follows_session() {
        assert_eq!(AppState::new(false).current_view, AppView::Login);
        assert_eq!(AppState::new(true).current_view, AppView::Groups);
    }

    #[test]
    fn test_report_item_navigates_to_matching_tab() {
        let item: ReportItem = serde_json::from_value(json!({
            "id": 1,
            "kelompokId": 5,
            "Laporan": { "id": 2, "nama_laporan": "Laporan Triwulan" }
        }))
        .unwrap();
        assert_eq!(
            AppView::for_report(&item),
            Some(AppView::GroupDetail { id: 5, tab: Some(ComponentKind::Laporan) })
        );

        let orphan: ReportItem = serde_json::from_value(json!({
            "id": 2,
            "Anggota": { "id": 3, "nama": "Siti" }
        }))
        .unwrap();
        assert_eq!(AppView::for_report(&orphan), None);
    }
}
