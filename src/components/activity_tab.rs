//! Kegiatan Tab Component

use std::collections::BTreeSet;

use leptos::prelude::*;
use list_view::SortSpec;

use super::component_tab::{delete_row, BulkDeleteBar, PageCheckbox, RowCheckbox};
use super::delete_confirm_button::DeleteConfirmButton;
use super::export_buttons::ExportButtons;
use super::filter_bar::{DateRangeInput, KeywordInput, ResetFiltersButton};
use super::list_controls::{facet_choices, ListControls, ListStatus};
use super::pagination::PaginationBar;
use super::remote_list::use_remote_list;
use super::sort_header::SortHeader;
use crate::api;
use crate::config::AppConfig;
use crate::context::use_app_context;
use crate::format;
use crate::listing::{ActivityFacet, ActivitySortKey};
use crate::models::{Activity, ComponentKind};

const KIND: ComponentKind = ComponentKind::Kegiatan;

fn file_link(config: &AppConfig, file: Option<&str>, label: &'static str) -> AnyView {
    match file.filter(|f| !f.trim().is_empty()) {
        Some(file) => view! {
            <a href=config.upload_url(file) target="_blank" rel="noopener">{label}</a>
        }
        .into_any(),
        None => "-".into_any(),
    }
}

#[component]
pub fn ActivityTab(group_id: u32) -> impl IntoView {
    let ctx = use_app_context();
    let config = ctx.config();
    let (reload, set_reload) = signal(0u32);
    let selection = RwSignal::new(BTreeSet::<u32>::new());
    let expanded = RwSignal::new(None::<u32>);

    let items = use_remote_list(
        "ActivityTab",
        move || reload.get(),
        move |api, _| async move { api::list_component::<Activity>(&api, KIND, group_id).await },
    );

    let controls = ListControls::new(SortSpec::descending(ActivitySortKey::Tanggal), config.page_size);
    let page = controls.page(items);
    let page_ids = Signal::derive(move || page.with(|p| p.rows.iter().map(|a| a.id).collect()));

    let refresh = Callback::new(move |_: ()| {
        selection.set(BTreeSet::new());
        set_reload.update(|n| *n += 1);
    });

    view! {
        <div class="component-tab">
            <div class="list-toolbar">
                <KeywordInput value=controls.keyword() on_input=controls.on_keyword() placeholder="Cari kegiatan..." />
                {controls.facet_select("Bulan", ActivityFacet::Bulan, facet_choices(items, ActivityFacet::Bulan))}
                <DateRangeInput range=controls.date_range() on_change=controls.on_date_range() />
                <ResetFiltersButton active_count=controls.active_count() on_reset=controls.on_reset() />
                <ExportButtons title="Data Kegiatan" rows=controls.export_rows(items) />
            </div>

            <BulkDeleteBar kind=KIND group_id=group_id selection=selection on_deleted=refresh />
            <ListStatus items=items filtered_total=controls.filtered_total(page) />

            <table class="data-table">
                <thead>
                    <tr>
                        <th class="select-col"><PageCheckbox ids=page_ids selection=selection /></th>
                        <SortHeader label="Tanggal" column=ActivitySortKey::Tanggal sort=controls.sort() on_sort=controls.on_sort() />
                        <SortHeader label="Kegiatan" column=ActivitySortKey::Nama sort=controls.sort() on_sort=controls.on_sort() />
                        <th>"Uraian"</th>
                        <th>"Materi"</th>
                        <th>"Notulensi"</th>
                        <th>"Foto"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || page.get().rows
                        key=|activity| activity.id
                        children=move |activity| {
                            let id = activity.id;
                            let photo_count = activity.foto.len();
                            let photos: Vec<String> = activity.foto.iter().map(|f| config.upload_url(&f.gambar)).collect();
                            view! {
                                <tr>
                                    <td><RowCheckbox id=id selection=selection /></td>
                                    <td>{format::optional_date(activity.tanggal)}</td>
                                    <td>{activity.nama_kegiatan.clone()}</td>
                                    <td class="description">{format::text(activity.uraian.as_deref())}</td>
                                    <td>{file_link(&config, activity.file_materi.as_deref(), "Materi")}</td>
                                    <td>{file_link(&config, activity.file_notulensi.as_deref(), "Notulensi")}</td>
                                    <td>
                                        <button
                                            class="link-btn"
                                            disabled=photo_count == 0
                                            on:click=move |_| expanded.update(|open| {
                                                *open = if *open == Some(id) { None } else { Some(id) };
                                            })
                                        >
                                            {format!("{} foto", photo_count)}
                                        </button>
                                    </td>
                                    <td>
                                        <DeleteConfirmButton on_confirm=move |_| delete_row(ctx, KIND, group_id, id, refresh) />
                                    </td>
                                </tr>
                                <Show when=move || expanded.get() == Some(id)>
                                    <tr class="photo-row">
                                        <td colspan="8">
                                            <div class="photo-strip">
                                                {photos.iter().map(|src| view! {
                                                    <a href=src.clone() target="_blank" rel="noopener">
                                                        <img class="thumb" src=src.clone() alt="Foto kegiatan" />
                                                    </a>
                                                }).collect_view()}
                                            </div>
                                        </td>
                                    </tr>
                                </Show>
                            }
                        }
                    />
                </tbody>
            </table>

            <PaginationBar paginator=controls.paginator(page) on_action=controls.on_page(page) />
        </div>
    }
}
