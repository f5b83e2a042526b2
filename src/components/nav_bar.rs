//! Navigation Bar Component
//!
//! Brand, the two top-level screens and logout.

use leptos::prelude::*;

use super::log_panel::LogPanel;
use crate::context::use_app_context;
use crate::store::{AppStateStoreFields, AppView};

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = use_app_context();
    let log_open = RwSignal::new(false);
    let groups_class = move || match ctx.store.current_view().get() {
        AppView::Groups | AppView::GroupDetail { .. } => "nav-btn active",
        _ => "nav-btn",
    };
    let reports_class = move || {
        if ctx.store.current_view().get() == AppView::Reports {
            "nav-btn active"
        } else {
            "nav-btn"
        }
    };

    view! {
        <nav class="nav-bar">
            <span class="nav-title">"Desa Prima"</span>
            <div class="nav-links">
                <button class=groups_class on:click=move |_| ctx.navigate(AppView::Groups)>
                    "Kelompok Desa"
                </button>
                <button class=reports_class on:click=move |_| ctx.navigate(AppView::Reports)>
                    "Pelaporan"
                </button>
            </div>
            <button class="nav-btn" title="Log" on:click=move |_| log_open.update(|o| *o = !*o)>
                "Log"
            </button>
            <button class="nav-btn logout" on:click=move |_| ctx.logout()>
                "Keluar"
            </button>
        </nav>
        <LogPanel open=log_open />
    }
}
