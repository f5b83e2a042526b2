//! Kas Tab Component
//!
//! Ledger table with income/expense/balance totals over the filtered lines.

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
use crate::context::use_app_context;
use crate::format;
use crate::listing::{CashFacet, CashSortKey};
use crate::models::{CashEntry, CashSummary, ComponentKind, JenisTransaksi};

const KIND: ComponentKind = ComponentKind::Kas;

#[component]
pub fn CashTab(group_id: u32) -> impl IntoView {
    let ctx = use_app_context();
    let config = ctx.config();
    let (reload, set_reload) = signal(0u32);
    let selection = RwSignal::new(BTreeSet::<u32>::new());

    let items = use_remote_list(
        "CashTab",
        move || reload.get(),
        move |api, _| async move { api::list_component::<CashEntry>(&api, KIND, group_id).await },
    );

    let controls = ListControls::new(SortSpec::descending(CashSortKey::Tanggal), config.page_size);
    let page = controls.page(items);
    let page_ids = Signal::derive(move || page.with(|p| p.rows.iter().map(|e| e.id).collect()));

    let summary = Memo::new(move |_| {
        items.with(|loaded| controls.state.with(|s| CashSummary::of(s.rows(loaded.items()))))
    });

    let refresh = Callback::new(move |_: ()| {
        selection.set(BTreeSet::new());
        set_reload.update(|n| *n += 1);
    });

    view! {
        <div class="component-tab">
            <div class="cash-summary">
                <div class="summary-card income">
                    <span>"Pemasukan"</span>
                    <strong>{move || format::rupiah(summary.get().pemasukan)}</strong>
                </div>
                <div class="summary-card expense">
                    <span>"Pengeluaran"</span>
                    <strong>{move || format::rupiah(summary.get().pengeluaran)}</strong>
                </div>
                <div class="summary-card balance">
                    <span>"Saldo"</span>
                    <strong>{move || format::rupiah(summary.get().saldo())}</strong>
                </div>
            </div>

            <div class="list-toolbar">
                <KeywordInput value=controls.keyword() on_input=controls.on_keyword() placeholder="Cari transaksi..." />
                {controls.facet_select("Jenis", CashFacet::Jenis, facet_choices(items, CashFacet::Jenis))}
                <DateRangeInput range=controls.date_range() on_change=controls.on_date_range() />
                <ResetFiltersButton active_count=controls.active_count() on_reset=controls.on_reset() />
                <ExportButtons title="Data Kas" rows=controls.export_rows(items) />
            </div>

            <BulkDeleteBar kind=KIND group_id=group_id selection=selection on_deleted=refresh />
            <ListStatus items=items filtered_total=controls.filtered_total(page) />

            <table class="data-table">
                <thead>
                    <tr>
                        <th class="select-col"><PageCheckbox ids=page_ids selection=selection /></th>
                        <SortHeader label="Tanggal" column=CashSortKey::Tanggal sort=controls.sort() on_sort=controls.on_sort() />
                        <SortHeader label="Transaksi" column=CashSortKey::Nama sort=controls.sort() on_sort=controls.on_sort() />
                        <th>"Jenis"</th>
                        <SortHeader label="Total" column=CashSortKey::Total sort=controls.sort() on_sort=controls.on_sort() />
                        <th>"Bukti"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || page.get().rows
                        key=|entry| entry.id
                        children=move |entry| {
                            let id = entry.id;
                            let amount_class = match entry.jenis_transaksi {
                                JenisTransaksi::Pemasukan => "amount income",
                                JenisTransaksi::Pengeluaran => "amount expense",
                            };
                            let receipt = entry.file.as_deref().map(|file| config.upload_url(file));
                            view! {
                                <tr>
                                    <td><RowCheckbox id=id selection=selection /></td>
                                    <td>{format::optional_date(entry.tgl_transaksi)}</td>
                                    <td>{entry.nama_transaksi.clone()}</td>
                                    <td>{entry.jenis_transaksi.as_str()}</td>
                                    <td class=amount_class>{format::rupiah(entry.total_transaksi)}</td>
                                    <td>
                                        {match receipt {
                                            Some(href) => view! { <a href=href target="_blank" rel="noopener">"Lihat"</a> }.into_any(),
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
