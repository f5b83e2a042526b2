//! Anggota Tab Component

use std::collections::BTreeSet;

use leptos::prelude::*;
use list_view::SortSpec;

use super::component_tab::{delete_row, BulkDeleteBar, PageCheckbox, RowCheckbox};
use super::export_buttons::ExportButtons;
use super::filter_bar::{KeywordInput, ResetFiltersButton};
use super::list_controls::{facet_choices, ListControls, ListStatus};
use super::pagination::PaginationBar;
use super::remote_list::use_remote_list;
use super::sort_header::SortHeader;
use super::delete_confirm_button::DeleteConfirmButton;
use crate::api;
use crate::context::use_app_context;
use crate::format;
use crate::listing::{MemberFacet, MemberSortKey};
use crate::models::{ComponentKind, Member};

const KIND: ComponentKind = ComponentKind::Anggota;

#[component]
pub fn MemberTab(group_id: u32) -> impl IntoView {
    let ctx = use_app_context();
    let (reload, set_reload) = signal(0u32);
    let selection = RwSignal::new(BTreeSet::<u32>::new());

    let items = use_remote_list(
        "MemberTab",
        move || reload.get(),
        move |api, _| async move { api::list_component::<Member>(&api, KIND, group_id).await },
    );

    let controls = ListControls::new(SortSpec::ascending(MemberSortKey::Nama), ctx.config().page_size);
    let page = controls.page(items);
    let page_ids = Signal::derive(move || page.with(|p| p.rows.iter().map(|m| m.id).collect()));

    let refresh = Callback::new(move |_: ()| {
        selection.set(BTreeSet::new());
        set_reload.update(|n| *n += 1);
    });

    view! {
        <div class="component-tab">
            <div class="list-toolbar">
                <KeywordInput value=controls.keyword() on_input=controls.on_keyword() placeholder="Cari anggota..." />
                {controls.facet_select("Jabatan", MemberFacet::Jabatan, facet_choices(items, MemberFacet::Jabatan))}
                {controls.facet_select("Sertifikasi", MemberFacet::Sertifikasi, facet_choices(items, MemberFacet::Sertifikasi))}
                <ResetFiltersButton active_count=controls.active_count() on_reset=controls.on_reset() />
                <ExportButtons title="Data Anggota" rows=controls.export_rows(items) />
            </div>

            <BulkDeleteBar kind=KIND group_id=group_id selection=selection on_deleted=refresh />
            <ListStatus items=items filtered_total=controls.filtered_total(page) />

            <table class="data-table">
                <thead>
                    <tr>
                        <th class="select-col"><PageCheckbox ids=page_ids selection=selection /></th>
                        <SortHeader label="Nama" column=MemberSortKey::Nama sort=controls.sort() on_sort=controls.on_sort() />
                        <SortHeader label="Jabatan" column=MemberSortKey::Jabatan sort=controls.sort() on_sort=controls.on_sort() />
                        <th>"No. HP"</th>
                        <th>"Usaha"</th>
                        <th>"Sertifikasi"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || page.get().rows
                        key=|member| member.id
                        children=move |member| {
                            let id = member.id;
                            view! {
                                <tr>
                                    <td><RowCheckbox id=id selection=selection /></td>
                                    <td>{member.nama}</td>
                                    <td>{format::text(member.jabatan.as_deref())}</td>
                                    <td>{format::text(member.nohp.as_deref())}</td>
                                    <td>{format::text(member.usaha.as_deref())}</td>
                                    <td>{format::text(member.sertifikasi.map(|s| s.as_str()))}</td>
                                    <td>
                                        <DeleteConfirmButton on_confirm=move |_| delete_row(ctx, KIND, group_id, id, refresh) />
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <PaginationBar paginator=controls.paginator(page) on_action=controls.on_page(page) />
        </div>
    }
}
