//! Toast Notifications Component

use leptos::prelude::*;

use crate::store::{store_dismiss, use_app_store, AppStateStoreFields};

/// Stack of transient notifications; click to dismiss early
#[component]
pub fn ToastHost() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="toast-host">
            <For
                each=move || store.notifications().get()
                key=|n| n.id
                children=move |n| {
                    let id = n.id;
                    view! {
                        <div class=n.kind.class() on:click=move |_| store_dismiss(store, id)>
                            {n.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
