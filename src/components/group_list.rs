//! Group List Component
//!
//! Village group registrations with review actions. The kabupaten picker
//! narrows the server query; every other filter runs on the loaded rows.

use leptos::prelude::*;
use list_view::SortSpec;

use super::export_buttons::ExportButtons;
use super::filter_bar::{DateRangeInput, KeywordInput, ResetFiltersButton};
use super::group_modal::GroupFlowModal;
use super::list_controls::{facet_choices, ListControls, ListStatus};
use super::pagination::PaginationBar;
use super::region_select::KabupatenSelect;
use super::remote_list::use_remote_list;
use super::sort_header::SortHeader;
use crate::api;
use crate::context::use_app_context;
use crate::flows::{GroupFlow, GroupMutation, GroupTarget};
use crate::format;
use crate::listing::{
    GroupFacet, GroupSortKey, GROUP_DISTRICT_NARROWER, GROUP_REGION_FACETS, GROUP_SUBDISTRICT_SCOPE,
};
use crate::models::{GroupStatus, VillageGroup};
use crate::store::AppView;

#[component]
pub fn GroupList() -> impl IntoView {
    let ctx = use_app_context();
    let kabupaten = RwSignal::new(None::<String>);
    let (reload, set_reload) = signal(0u32);
    let flow = RwSignal::new(GroupFlow::default());

    let items = use_remote_list(
        "GroupList",
        move || {
            reload.track();
            kabupaten.get()
        },
        |api, kabupaten| async move { api::list_groups(&api, kabupaten.as_deref()).await },
    );

    let controls = ListControls::new(SortSpec::descending(GroupSortKey::Tanggal), ctx.config().page_size);
    let page = controls.page(items);

    let status_options = Signal::derive(|| {
        GroupStatus::ALL
            .iter()
            .map(|s| (s.as_str().to_string(), s.label().to_string()))
            .collect()
    });

    let open_flow = move |group: &VillageGroup, mutation: GroupMutation| {
        let target = GroupTarget::from(group);
        log::debug!("[GroupList] {} on group {}", mutation.title(), target.id);
        flow.update(|f| {
            f.open(target, mutation);
        });
    };

    let on_completed = Callback::new(move |_: (GroupTarget, GroupMutation)| {
        set_reload.update(|n| *n += 1);
    });

    view! {
        <section class="group-list">
            <header class="screen-header">
                <h1>"Kelompok Desa"</h1>
                <ExportButtons title="Data Kelompok Desa" rows=controls.export_rows(items) />
            </header>

            <div class="list-toolbar">
                <KabupatenSelect selected=kabupaten on_change=controls.on_clear_facets(&GROUP_REGION_FACETS) />
                <KeywordInput value=controls.keyword() on_input=controls.on_keyword() placeholder="Cari kelompok..." />
                {controls.facet_select("Status", GroupFacet::Status, status_options)}
                {controls.facet_select("Kategori", GroupFacet::Kategori, facet_choices(items, GroupFacet::Kategori))}
                {controls.facet_select_resetting(
                    "Kabupaten",
                    GroupFacet::Kabupaten,
                    facet_choices(items, GroupFacet::Kabupaten),
                    &GROUP_DISTRICT_NARROWER,
                )}
                {controls.facet_select(
                    "Kecamatan",
                    GroupFacet::Kecamatan,
                    controls.scoped_choices(items, GroupFacet::Kecamatan, &GROUP_SUBDISTRICT_SCOPE),
                )}
                <DateRangeInput range=controls.date_range() on_change=controls.on_date_range() />
                <ResetFiltersButton active_count=controls.active_count() on_reset=controls.on_reset() />
            </div>

            <ListStatus items=items filtered_total=controls.filtered_total(page) />

            <table class="data-table">
                <thead>
                    <tr>
                        <SortHeader label="Nama" column=GroupSortKey::Nama sort=controls.sort() on_sort=controls.on_sort() />
                        <SortHeader label="Alamat" column=GroupSortKey::Kabupaten sort=controls.sort() on_sort=controls.on_sort() />
                        <SortHeader label="Tanggal Pembentukan" column=GroupSortKey::Tanggal sort=controls.sort() on_sort=controls.on_sort() />
                        <SortHeader label="Anggota" column=GroupSortKey::Anggota sort=controls.sort() on_sort=controls.on_sort() />
                        <th>"Kategori"</th>
                        <SortHeader label="Status" column=GroupSortKey::Status sort=controls.sort() on_sort=controls.on_sort() />
                        <th>"Aksi"</th>
                    </tr>
                </thead>
                <tbody>
                    // status is part of the key so a reviewed row re-renders
                    <For
                        each=move || page.get().rows
                        key=|group| (group.id, group.status)
                        children=move |group| {
                            let id = group.id;
                            let group = StoredValue::new(group);
                            let g = group.get_value();
                            view! {
                                <tr>
                                    <td>
                                        <button
                                            class="link-btn"
                                            on:click=move |_| ctx.navigate(AppView::GroupDetail { id, tab: None })
                                        >
                                            {g.nama.clone()}
                                        </button>
                                    </td>
                                    <td>{g.alamat()}</td>
                                    <td>{format::optional_date(g.tanggal_pembentukan)}</td>
                                    <td>{g.jumlah_anggota_awal.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string())}</td>
                                    <td>{format::text(g.kategori.map(|k| k.as_str()))}</td>
                                    <td><span class=g.status.badge_class()>{g.status.label()}</span></td>
                                    <td class="row-actions">
                                        <button
                                            class="action-btn approve"
                                            disabled=g.status == GroupStatus::Disetujui
                                            on:click=move |_| group.with_value(|g| open_flow(g, GroupMutation::Status(GroupStatus::Disetujui)))
                                        >
                                            "Setujui"
                                        </button>
                                        <button
                                            class="action-btn reject"
                                            disabled=g.status == GroupStatus::Ditolak
                                            on:click=move |_| group.with_value(|g| open_flow(g, GroupMutation::Status(GroupStatus::Ditolak)))
                                        >
                                            "Tolak"
                                        </button>
                                        <button
                                            class="action-btn"
                                            on:click=move |_| group.with_value(|g| {
                                                open_flow(g, GroupMutation::Catatan(g.catatan.clone().unwrap_or_default()))
                                            })
                                        >
                                            "Catatan"
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <PaginationBar paginator=controls.paginator(page) on_action=controls.on_page(page) />

            <GroupFlowModal flow=flow on_completed=on_completed />
        </section>
    }
}
