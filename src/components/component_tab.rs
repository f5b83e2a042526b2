//! Component Tab Helpers
//!
//! Row selection, bulk delete and single-row delete shared by the group
//! detail tabs.

use std::collections::BTreeSet;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::bulk::BulkOutcome;
use crate::context::{use_app_context, AppContext};
use crate::models::ComponentKind;

/// Ids of the rows ticked for a bulk action
pub type Selection = RwSignal<BTreeSet<u32>>;

#[component]
pub fn RowCheckbox(id: u32, selection: Selection) -> impl IntoView {
    view! {
        <input
            type="checkbox"
            prop:checked=move || selection.with(|s| s.contains(&id))
            on:change=move |_| selection.update(|s| {
                if !s.remove(&id) {
                    s.insert(id);
                }
            })
        />
    }
}

/// Header checkbox: ticks or clears every row on the current page
#[component]
pub fn PageCheckbox(#[prop(into)] ids: Signal<Vec<u32>>, selection: Selection) -> impl IntoView {
    let all_selected = move || {
        let ids = ids.get();
        !ids.is_empty() && selection.with(|s| ids.iter().all(|id| s.contains(id)))
    };

    view! {
        <input
            type="checkbox"
            prop:checked=all_selected
            on:change=move |_| {
                let ids = ids.get_untracked();
                let select = !all_selected();
                selection.update(|s| {
                    for id in ids {
                        if select {
                            s.insert(id);
                        } else {
                            s.remove(&id);
                        }
                    }
                });
            }
        />
    }
}

/// "n dipilih" bar with the bulk delete action
#[component]
pub fn BulkDeleteBar(
    kind: ComponentKind,
    group_id: u32,
    selection: Selection,
    #[prop(into)] on_deleted: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let (busy, set_busy) = signal(false);

    let delete_selected = move |_| {
        let ids: Vec<u32> = selection.get_untracked().into_iter().collect();
        if ids.is_empty() || busy.get_untracked() {
            return;
        }
        set_busy.set(true);
        spawn_local(async move {
            match api::delete_multiple(&ctx.api(), group_id, kind, &ids).await {
                Ok((succeeded, failed)) => {
                    let outcome = BulkOutcome { succeeded, failed, errors: Vec::new() };
                    if outcome.is_clean() {
                        ctx.notify_success(format!("{} {} dihapus", succeeded, kind.label()));
                    } else {
                        ctx.notify_error(format!("Hapus {}: {}", kind.label(), outcome.summary()));
                    }
                    on_deleted.run(());
                }
                Err(e) => ctx.report_error(&format!("Gagal menghapus {}", kind.label()), &e),
            }
            set_busy.try_set(false);
        });
    };

    view! {
        <Show when=move || selection.with(|s| !s.is_empty())>
            <div class="bulk-bar">
                <span>{move || format!("{} dipilih", selection.with(|s| s.len()))}</span>
                <button class="bulk-btn" on:click=move |_| selection.set(BTreeSet::new())>"Batal pilih"</button>
                <button class="bulk-btn danger" disabled=move || busy.get() on:click=delete_selected>
                    {move || if busy.get() { "Menghapus..." } else { "Hapus terpilih" }}
                </button>
            </div>
        </Show>
    }
}

/// Delete one component row, then run `on_deleted`
pub fn delete_row(ctx: AppContext, kind: ComponentKind, group_id: u32, item_id: u32, on_deleted: Callback<()>) {
    spawn_local(async move {
        match api::delete_component_item(&ctx.api(), kind, group_id, item_id).await {
            Ok(()) => {
                ctx.notify_success(format!("{} dihapus", kind.label()));
                on_deleted.run(());
            }
            Err(e) => ctx.report_error(&format!("Gagal menghapus {}", kind.label()), &e),
        }
    });
}
