//! Laporan Tab Component
//!
//! Uploaded report files, with single and bulk downloads.

use std::collections::BTreeSet;

use leptos::prelude::*;
use leptos::task::spawn_local;
use list_view::SortSpec;

use super::component_tab::{delete_row, BulkDeleteBar, PageCheckbox, RowCheckbox};
use super::delete_confirm_button::DeleteConfirmButton;
use super::export_buttons::ExportButtons;
use super::filter_bar::{DateRangeInput, KeywordInput, ResetFiltersButton};
use super::list_controls::{facet_choices, ListControls, ListStatus};
use super::pagination::PaginationBar;
use super::remote_list::use_remote_list;
use super::sort_header::SortHeader;
use crate::api::{self, ApiClient};
use crate::bulk;
use crate::context::use_app_context;
use crate::export::{self, ExportError};
use crate::format;
use crate::listing::{ReportFileFacet, ReportFileSortKey};
use crate::models::{ComponentKind, Report};

const KIND: ComponentKind = ComponentKind::Laporan;
const DOWNLOAD_MIME: &str = "application/octet-stream";

/// Fetch one uploaded file and hand it to the browser
async fn download(api: ApiClient, file: String) -> Result<(), ExportError> {
    let url = api.config().upload_url(&file);
    let bytes = api.fetch_bytes(&url).await?;
    export::save_bytes(&bytes, &export::file_name_of(&file), DOWNLOAD_MIME)
}

#[component]
pub fn LaporanTab(group_id: u32) -> impl IntoView {
    let ctx = use_app_context();
    let config = ctx.config();
    let (reload, set_reload) = signal(0u32);
    let (downloading, set_downloading) = signal(false);
    let selection = RwSignal::new(BTreeSet::<u32>::new());

    let items = use_remote_list(
        "LaporanTab",
        move || reload.get(),
        move |api, _| async move { api::list_component::<Report>(&api, KIND, group_id).await },
    );

    let controls = ListControls::new(SortSpec::descending(ReportFileSortKey::Tanggal), config.page_size);
    let page = controls.page(items);
    let page_ids = Signal::derive(move || page.with(|p| p.rows.iter().map(|r| r.id).collect()));

    let refresh = Callback::new(move |_: ()| {
        selection.set(BTreeSet::new());
        set_reload.update(|n| *n += 1);
    });

    let download_selected = move |_| {
        if downloading.get_untracked() {
            return;
        }
        let files: Vec<String> = selection.with_untracked(|selected| {
            items.with_untracked(|loaded| {
                loaded
                    .items()
                    .iter()
                    .filter(|r| selected.contains(&r.id))
                    .filter_map(|r| r.file.clone())
                    .collect()
            })
        });
        if files.is_empty() {
            ctx.notify_error("Laporan terpilih tidak memiliki berkas");
            return;
        }
        set_downloading.set(true);
        let api = ctx.api();
        let limit = ctx.config().bulk_concurrency;
        spawn_local(async move {
            let outcome = bulk::run_bounded(files, limit, |file| download(api.clone(), file)).await;
            if outcome.is_clean() {
                ctx.notify_success(format!("Unduhan: {}", outcome.summary()));
            } else {
                let detail = outcome.errors.join("; ");
                ctx.notify_error(format!("Unduhan: {} ({})", outcome.summary(), detail));
            }
            set_downloading.try_set(false);
        });
    };

    let download_one = move |file: String| {
        let api = ctx.api();
        spawn_local(async move {
            if let Err(e) = download(api, file).await {
                ctx.notify_error(format!("Gagal mengunduh: {}", e));
            }
        });
    };

    view! {
        <div class="component-tab">
            <div class="list-toolbar">
                <KeywordInput value=controls.keyword() on_input=controls.on_keyword() placeholder="Cari laporan..." />
                {controls.facet_select("Tahun", ReportFileFacet::Tahun, facet_choices(items, ReportFileFacet::Tahun))}
                <DateRangeInput range=controls.date_range() on_change=controls.on_date_range() />
                <ResetFiltersButton active_count=controls.active_count() on_reset=controls.on_reset() />
                <ExportButtons title="Data Laporan" rows=controls.export_rows(items) />
            </div>

            <Show when=move || selection.with(|s| !s.is_empty())>
                <button class="bulk-btn" disabled=move || downloading.get() on:click=download_selected>
                    {move || if downloading.get() { "Mengunduh..." } else { "Unduh terpilih" }}
                </button>
            </Show>
            <BulkDeleteBar kind=KIND group_id=group_id selection=selection on_deleted=refresh />
            <ListStatus items=items filtered_total=controls.filtered_total(page) />

            <table class="data-table">
                <thead>
                    <tr>
                        <th class="select-col"><PageCheckbox ids=page_ids selection=selection /></th>
                        <SortHeader label="Nama Laporan" column=ReportFileSortKey::Nama sort=controls.sort() on_sort=controls.on_sort() />
                        <SortHeader label="Diunggah" column=ReportFileSortKey::Tanggal sort=controls.sort() on_sort=controls.on_sort() />
                        <th>"Berkas"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || page.get().rows
                        key=|report| report.id
                        children=move |report| {
                            let id = report.id;
                            view! {
                                <tr>
                                    <td><RowCheckbox id=id selection=selection /></td>
                                    <td>{report.nama_laporan.clone()}</td>
                                    <td>{format::optional_date(report.created_at)}</td>
                                    <td>
                                        {match report.file.clone() {
                                            Some(file) => view! {
                                                <button class="link-btn" on:click=move |_| download_one(file.clone())>
                                                    "Unduh"
                                                </button>
                                            }
                                            .into_any(),
                                            None => "-".into_any(),
                                        }}
                                    </td>
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
