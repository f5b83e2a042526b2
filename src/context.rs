//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::api::{self, ApiClient};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::store::{store_notify, AppStateStoreFields, AppStore, AppView, NotificationKind};

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    api: StoredValue<ApiClient>,
    pub store: AppStore,
}

impl AppContext {
    pub fn new(api: ApiClient, store: AppStore) -> Self {
        Self {
            api: StoredValue::new(api),
            store,
        }
    }

    /// Client handle for a request; cheap to clone
    pub fn api(&self) -> ApiClient {
        self.api.get_value()
    }

    pub fn config(&self) -> AppConfig {
        self.api.with_value(|api| api.config().clone())
    }

    pub fn navigate(&self, view: AppView) {
        log::debug!("[Nav] {:?}", view);
        self.store.current_view().set(view);
    }

    pub fn notify_success(&self, message: impl Into<String>) {
        store_notify(self.store, NotificationKind::Success, message);
    }

    pub fn notify_error(&self, message: impl Into<String>) {
        store_notify(self.store, NotificationKind::Error, message);
    }

    /// Surface a failed call; an expired token ends the session
    pub fn report_error(&self, action: &str, error: &ApiError) {
        if error.is_unauthorized() {
            self.logout();
            self.notify_error("Sesi berakhir, silakan masuk kembali");
        } else {
            self.notify_error(format!("{}: {}", action, error));
        }
    }

    pub fn login_succeeded(&self) {
        self.store.authenticated().set(true);
        self.navigate(AppView::Groups);
    }

    pub fn logout(&self) {
        self.api.with_value(api::logout);
        self.store.authenticated().set(false);
        self.navigate(AppView::Login);
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
