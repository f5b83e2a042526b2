//! Desa Prima Admin App
//!
//! Root component: wires the API client, store and context, then switches
//! screens on the current view.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::api::ApiClient;
use crate::components::{GroupDetail, GroupList, LoginForm, NavBar, ReportFeed, ToastHost};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::session::Session;
use crate::store::{AppState, AppStateStoreFields, AppView};

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let session = Session::browser(config.token_key.clone());
    let authenticated = session.is_authenticated();
    log::info!("[App] Starting, authenticated={}", authenticated);

    let store = Store::new(AppState::new(authenticated));
    let ctx = AppContext::new(ApiClient::new(config, session), store);
    provide_context(store);
    provide_context(ctx);

    let screen = move || {
        if !store.authenticated().get() {
            return view! { <LoginForm /> }.into_any();
        }
        match store.current_view().get() {
            AppView::Login | AppView::Groups => view! { <GroupList /> }.into_any(),
            AppView::GroupDetail { id, tab } => view! { <GroupDetail id=id initial_tab=tab /> }.into_any(),
            AppView::Reports => view! { <ReportFeed /> }.into_any(),
        }
    };

    view! {
        <div class="app-layout">
            <Show when=move || store.authenticated().get()>
                <NavBar />
            </Show>
            <main class="main-content">
                {screen}
            </main>
            <ToastHost />
        </div>
    }
}
