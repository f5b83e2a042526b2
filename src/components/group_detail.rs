//! Group Detail Component
//!
//! One village group: its registration data, the review actions, and a tab
//! per component collection.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::activity_tab::ActivityTab;
use super::cash_tab::CashTab;
use super::group_modal::GroupFlowModal;
use super::laporan_tab::LaporanTab;
use super::member_tab::MemberTab;
use super::product_tab::ProductTab;
use crate::api;
use crate::context::use_app_context;
use crate::flows::{GroupFlow, GroupMutation, GroupTarget};
use crate::format;
use crate::models::{ComponentKind, GroupStatus, VillageGroup};
use crate::store::AppView;

#[component]
pub fn GroupDetail(id: u32, initial_tab: Option<ComponentKind>) -> impl IntoView {
    let ctx = use_app_context();
    let group = RwSignal::new(None::<Result<VillageGroup, String>>);
    let (reload, set_reload) = signal(0u32);
    let flow = RwSignal::new(GroupFlow::default());

    let first_tab = initial_tab
        .or_else(|| ctx.api().session().last_tab())
        .unwrap_or_default();
    let (tab, set_tab) = signal(first_tab);

    Effect::new(move |_| {
        reload.track();
        spawn_local(async move {
            let result = api::get_group(&ctx.api(), id).await;
            if let Err(e) = &result {
                ctx.report_error("Gagal memuat kelompok", e);
            }
            group.try_set(Some(result.map_err(|e| e.to_string())));
        });
    });

    let select_tab = move |kind: ComponentKind| {
        set_tab.set(kind);
        ctx.api().session().set_last_tab(kind);
    };

    let open_flow = move |mutation: GroupMutation| {
        let Some(target) = group.with_untracked(|g| match g {
            Some(Ok(g)) => Some(GroupTarget::from(g)),
            _ => None,
        }) else {
            return;
        };
        flow.update(|f| {
            f.open(target, mutation);
        });
    };

    let on_completed = Callback::new(move |(_, mutation): (GroupTarget, GroupMutation)| {
        if mutation == GroupMutation::Delete {
            ctx.navigate(AppView::Groups);
        } else {
            set_reload.update(|n| *n += 1);
        }
    });

    let back = move |_| ctx.navigate(AppView::Groups);

    let header = move || {
        group.with(|loaded| match loaded {
            None => view! { <p class="list-status">"Memuat data..."</p> }.into_any(),
            Some(Err(message)) => view! {
                <div class="load-error">
                    <p>{format!("Kelompok tidak dapat dimuat: {}", message)}</p>
                    <button class="back-btn" on:click=back>"Kembali"</button>
                </div>
            }
            .into_any(),
            Some(Ok(g)) => {
                let status = g.status;
                let note = g.catatan.clone();
                let note_text = format::text(note.as_deref());
                view! {
                    <header class="screen-header">
                        <button class="back-btn" on:click=back>"← Kembali"</button>
                        <h1>{g.nama.clone()}</h1>
                        <span class=status.badge_class()>{status.label()}</span>
                    </header>
                    <dl class="group-facts">
                        <dt>"Alamat"</dt>
                        <dd>{format::text(Some(g.alamat().as_str()))}</dd>
                        <dt>"Tanggal Pembentukan"</dt>
                        <dd>{format::optional_date(g.tanggal_pembentukan)}</dd>
                        <dt>"Anggota Awal"</dt>
                        <dd>{g.jumlah_anggota_awal.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string())}</dd>
                        <dt>"Hibah Diterima"</dt>
                        <dd>{format::optional_rupiah(g.jumlah_hibah_diterima)}</dd>
                        <dt>"Kategori"</dt>
                        <dd>{format::text(g.kategori.map(|k| k.as_str()))}</dd>
                        <dt>"Catatan"</dt>
                        <dd>{note_text}</dd>
                    </dl>
                    <div class="row-actions">
                        <button
                            class="action-btn approve"
                            disabled=status == GroupStatus::Disetujui
                            on:click=move |_| open_flow(GroupMutation::Status(GroupStatus::Disetujui))
                        >
                            "Setujui"
                        </button>
                        <button
                            class="action-btn reject"
                            disabled=status == GroupStatus::Ditolak
                            on:click=move |_| open_flow(GroupMutation::Status(GroupStatus::Ditolak))
                        >
                            "Tolak"
                        </button>
                        <button
                            class="action-btn"
                            on:click=move |_| open_flow(GroupMutation::Catatan(note.clone().unwrap_or_default()))
                        >
                            "Catatan"
                        </button>
                        <button class="action-btn danger" on:click=move |_| open_flow(GroupMutation::Delete)>
                            "Hapus"
                        </button>
                    </div>
                }
                .into_any()
            }
        })
    };

    let loaded = move || group.with(|g| matches!(g, Some(Ok(_))));

    view! {
        <section class="group-detail">
            {header}

            <Show when=loaded>
                <nav class="tab-bar">
                    {ComponentKind::ALL.into_iter().map(|kind| view! {
                        <button
                            class=move || if tab.get() == kind { "tab active" } else { "tab" }
                            on:click=move |_| select_tab(kind)
                        >
                            {kind.label()}
                        </button>
                    }).collect_view()}
                </nav>

                {move || match tab.get() {
                    ComponentKind::Anggota => view! { <MemberTab group_id=id /> }.into_any(),
                    ComponentKind::Produk => view! { <ProductTab group_id=id /> }.into_any(),
                    ComponentKind::Kas => view! { <CashTab group_id=id /> }.into_any(),
                    ComponentKind::Kegiatan => view! { <ActivityTab group_id=id /> }.into_any(),
                    ComponentKind::Laporan => view! { <LaporanTab group_id=id /> }.into_any(),
                }}
            </Show>

            <GroupFlowModal flow=flow on_completed=on_completed />
        </section>
    }
}
