//! Report Feed Component
//!
//! Pelaporan activity stream across all groups. Kabupaten and date range
//! go to the server; type and region facets narrow the loaded items.

use leptos::prelude::*;
use list_view::SortSpec;

use super::export_buttons::ExportButtons;
use super::filter_bar::{DateRangeInput, KeywordInput, ResetFiltersButton};
use super::list_controls::{facet_choices, ListControls, ListStatus};
use super::pagination::PaginationBar;
use super::region_select::KabupatenSelect;
use super::remote_list::use_remote_list;
use super::sort_header::SortHeader;
use crate::api::{self, ReportQuery};
use crate::context::use_app_context;
use crate::format;
use crate::listing::{
    ReportFacet, ReportSortKey, REPORT_DISTRICT_NARROWER, REPORT_GROUP_SCOPE, REPORT_REGION_FACETS,
    REPORT_SUBDISTRICT_NARROWER, REPORT_SUBDISTRICT_SCOPE,
};
use crate::models::{ReportItem, ReportKind, ReportPayload};
use crate::store::AppView;

/// Secondary line of a feed card
fn payload_detail(item: &ReportItem) -> String {
    match &item.payload {
        ReportPayload::Produk(p) => format::optional_rupiah(p.harga_akhir.or(p.harga_awal)),
        ReportPayload::Anggota(m) => format::text(m.jabatan.as_deref()),
        ReportPayload::Kas(k) => format!("{} {}", k.jenis_transaksi.as_str(), format::rupiah(k.total_transaksi)),
        ReportPayload::Laporan(l) => format::optional_date(l.created_at),
        ReportPayload::Kegiatan(k) => format::optional_date(k.tanggal),
        ReportPayload::KelompokDesa(g) => g.status.label().to_string(),
    }
}

#[component]
pub fn ReportFeed() -> impl IntoView {
    let ctx = use_app_context();
    let kabupaten = RwSignal::new(None::<String>);
    let controls = ListControls::new(SortSpec::descending(ReportSortKey::Tanggal), ctx.config().page_size);

    // typing a keyword must not refetch
    let query = Memo::new(move |_| {
        let range = controls.state.with(|s| s.filter.date_range());
        ReportQuery {
            kabupaten: kabupaten.get(),
            start_date: range.start,
            end_date: range.end,
        }
    });

    let items = use_remote_list(
        "ReportFeed",
        move || query.get(),
        |api, query: ReportQuery| async move { api::list_reports(&api, &query).await },
    );
    let page = controls.page(items);

    let kind_options = Signal::derive(|| {
        ReportKind::ALL
            .iter()
            .map(|k| (k.label().to_string(), k.label().to_string()))
            .collect()
    });

    view! {
        <section class="report-feed">
            <header class="screen-header">
                <h1>"Pelaporan"</h1>
                <ExportButtons title="Data Pelaporan" rows=controls.export_rows(items) />
            </header>

            <div class="list-toolbar">
                <KabupatenSelect selected=kabupaten on_change=controls.on_clear_facets(&REPORT_REGION_FACETS) />
                <DateRangeInput range=controls.date_range() on_change=controls.on_date_range() />
                <KeywordInput value=controls.keyword() on_input=controls.on_keyword() placeholder="Cari laporan..." />
                {controls.facet_select("Jenis", ReportFacet::Jenis, kind_options)}
                {controls.facet_select_resetting(
                    "Kabupaten",
                    ReportFacet::Kabupaten,
                    facet_choices(items, ReportFacet::Kabupaten),
                    &REPORT_DISTRICT_NARROWER,
                )}
                {controls.facet_select_resetting(
                    "Kecamatan",
                    ReportFacet::Kecamatan,
                    controls.scoped_choices(items, ReportFacet::Kecamatan, &REPORT_SUBDISTRICT_SCOPE),
                    &REPORT_SUBDISTRICT_NARROWER,
                )}
                {controls.facet_select(
                    "Kelompok",
                    ReportFacet::Kelompok,
                    controls.scoped_choices(items, ReportFacet::Kelompok, &REPORT_GROUP_SCOPE),
                )}
                <ResetFiltersButton active_count=controls.active_count() on_reset=controls.on_reset() />
            </div>

            <table class="sort-bar">
                <thead>
                    <tr>
                        <SortHeader label="Tanggal" column=ReportSortKey::Tanggal sort=controls.sort() on_sort=controls.on_sort() />
                        <SortHeader label="Jenis" column=ReportSortKey::Jenis sort=controls.sort() on_sort=controls.on_sort() />
                        <SortHeader label="Kelompok" column=ReportSortKey::Kelompok sort=controls.sort() on_sort=controls.on_sort() />
                    </tr>
                </thead>
            </table>

            <ListStatus items=items filtered_total=controls.filtered_total(page) />

            <ul class="feed">
                <For
                    each=move || page.get().rows
                    key=|item| item.id
                    children=move |item| {
                        let target = AppView::for_report(&item);
                        let linked = target.is_some();
                        let group = item.group().map(|g| (g.nama.clone(), g.alamat()));
                        let reporter = item.user.as_ref().map(|u| u.name.clone());
                        view! {
                            <li
                                class=if linked { "feed-item linked" } else { "feed-item" }
                                on:click=move |_| {
                                    if let Some(view) = target.clone() {
                                        ctx.navigate(view);
                                    }
                                }
                            >
                                <div class="feed-meta">
                                    <span class="badge">{item.kind().label()}</span>
                                    <span class="feed-date">{format::optional_date(item.tgl_lapor)}</span>
                                </div>
                                <h3>{item.payload.title().to_string()}</h3>
                                <p class="feed-detail">{payload_detail(&item)}</p>
                                {group.map(|(nama, alamat)| view! {
                                    <p class="feed-group">{nama}" · "{alamat}</p>
                                })}
                                {item.deskripsi.clone().map(|text| view! { <p class="feed-description">{text}</p> })}
                                {reporter.map(|name| view! { <p class="feed-reporter">{format!("Dilaporkan oleh {}", name)}</p> })}
                            </li>
                        }
                    }
                />
            </ul>

            <PaginationBar paginator=controls.paginator(page) on_action=controls.on_page(page) />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CashEntry, JenisTransaksi};

    #[test]
    fn test_cash_payload_detail() {
        let item = ReportItem {
            id: 1,
            deskripsi: None,
            tgl_lapor: None,
            user: None,
            kelompok_id: Some(3),
            kelompok: None,
            payload: ReportPayload::Kas(CashEntry {
                id: 8,
                nama_transaksi: "Iuran".to_string(),
                jenis_transaksi: JenisTransaksi::Pemasukan,
                total_transaksi: 50_000,
                tgl_transaksi: None,
                file: None,
            }),
        };
        assert_eq!(payload_detail(&item), "Pemasukan Rp 50.000");
    }
}
