//! Group Mutation Modal Component
//!
//! Confirmation dialog for status changes, reviewer notes and deletes.
//! Stays open with the server's message when the mutation fails.

use leptos::prelude::*;
use leptos::task::spawn_local;
use list_view::FlowOutcome;

use crate::context::use_app_context;
use crate::flows::{self, GroupFlow, GroupMutation, GroupTarget, MutationKind};
use crate::models::GroupStatus;

#[component]
pub fn GroupFlowModal(
    flow: RwSignal<GroupFlow>,
    /// Runs after the server accepted the mutation
    #[prop(into)] on_completed: Callback<(GroupTarget, GroupMutation)>,
) -> impl IntoView {
    let ctx = use_app_context();

    // Body only re-renders when the form changes, not on every keystroke
    let kind = Memo::new(move |_| flow.with(|f| f.value().map(GroupMutation::kind)));
    let busy = move || flow.with(|f| f.is_busy());

    let confirm = move |_| {
        let Some((target, mutation)) = flow.try_update(|f| f.confirm()).flatten() else {
            return;
        };
        spawn_local(async move {
            let result = flows::submit(&ctx.api(), &target, &mutation).await;
            if let Err(e) = &result {
                if e.is_unauthorized() {
                    ctx.report_error(mutation.title(), e);
                }
            }
            let outcome = flow.try_update(|f| f.resolve(result.map_err(|e| e.to_string()))).flatten();
            if outcome == Some(FlowOutcome::Completed) {
                ctx.notify_success(mutation.success_message(&target));
                on_completed.run((target, mutation));
            }
        });
    };

    let cancel = move |_| {
        flow.update(|f| {
            f.cancel();
        });
    };

    let title = move || flow.with(|f| f.value().map(|m| m.title()).unwrap_or_default());
    let group_name = move || flow.with(|f| f.target().map(|t| t.nama.clone()).unwrap_or_default());

    let body = move || match kind.get() {
        Some(MutationKind::Status) => view! {
            <div class="status-options">
                {GroupStatus::ALL.iter().map(|status| {
                    let status = *status;
                    let is_selected = move || flow.with(|f| f.value() == Some(&GroupMutation::Status(status)));
                    view! {
                        <label class="status-option">
                            <input
                                type="radio"
                                name="group-status"
                                prop:checked=is_selected
                                on:change=move |_| flow.update(|f| f.set_value(GroupMutation::Status(status)))
                            />
                            <span class=status.badge_class()>{status.label()}</span>
                        </label>
                    }
                }).collect_view()}
            </div>
        }
        .into_any(),
        Some(MutationKind::Catatan) => view! {
            <textarea
                class="note-input"
                rows="5"
                placeholder="Catatan untuk kelompok"
                prop:value=move || flow.with(|f| match f.value() {
                    Some(GroupMutation::Catatan(text)) => text.clone(),
                    _ => String::new(),
                })
                on:input=move |ev| flow.update(|f| f.set_value(GroupMutation::Catatan(event_target_value(&ev))))
            />
        }
        .into_any(),
        Some(MutationKind::Delete) => view! {
            <p class="modal-warning">"Kelompok beserta seluruh datanya akan dihapus permanen."</p>
        }
        .into_any(),
        None => ().into_any(),
    };

    view! {
        <Show when=move || flow.with(|f| f.is_open())>
            <div class="modal-backdrop">
                <div class="modal">
                    <h2>{title}</h2>
                    <p class="modal-subject">{group_name}</p>

                    {body}

                    {move || flow.with(|f| f.error().map(str::to_string)).map(|message| view! {
                        <p class="form-error">{message}</p>
                    })}

                    <div class="modal-actions">
                        <button class="cancel-btn" disabled=busy on:click=cancel>"Batal"</button>
                        <button
                            class=move || if kind.get() == Some(MutationKind::Delete) { "confirm-btn danger" } else { "confirm-btn" }
                            disabled=busy
                            on:click=confirm
                        >
                            {move || if busy() { "Menyimpan..." } else { "Simpan" }}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
