//! Produk Tab Component

use std::collections::BTreeSet;

use leptos::prelude::*;
use list_view::SortSpec;

use super::component_tab::{delete_row, BulkDeleteBar, PageCheckbox, RowCheckbox};
use super::delete_confirm_button::DeleteConfirmButton;
use super::export_buttons::ExportButtons;
use super::filter_bar::{KeywordInput, ResetFiltersButton};
use super::list_controls::{facet_choices, ListControls, ListStatus};
use super::pagination::PaginationBar;
use super::remote_list::use_remote_list;
use super::sort_header::SortHeader;
use crate::api;
use crate::context::use_app_context;
use crate::format;
use crate::listing::{ProductFacet, ProductSortKey};
use crate::models::{ComponentKind, Product};

const KIND: ComponentKind = ComponentKind::Produk;

/// "Rp 10.000 - Rp 15.000", or a single price when both ends match
fn price_range(product: &Product) -> String {
    match (product.harga_awal, product.harga_akhir) {
        (Some(from), Some(to)) if from != to => format!("{} - {}", format::rupiah(from), format::rupiah(to)),
        (Some(price), _) | (None, Some(price)) => format::rupiah(price),
        (None, None) => "-".to_string(),
    }
}

#[component]
pub fn ProductTab(group_id: u32) -> impl IntoView {
    let ctx = use_app_context();
    let config = ctx.config();
    let (reload, set_reload) = signal(0u32);
    let selection = RwSignal::new(BTreeSet::<u32>::new());

    let items = use_remote_list(
        "ProductTab",
        move || reload.get(),
        move |api, _| async move { api::list_component::<Product>(&api, KIND, group_id).await },
    );

    let controls = ListControls::new(SortSpec::ascending(ProductSortKey::Nama), config.page_size);
    let page = controls.page(items);
    let page_ids = Signal::derive(move || page.with(|p| p.rows.iter().map(|p| p.id).collect()));

    let refresh = Callback::new(move |_: ()| {
        selection.set(BTreeSet::new());
        set_reload.update(|n| *n += 1);
    });

    view! {
        <div class="component-tab">
            <div class="list-toolbar">
                <KeywordInput value=controls.keyword() on_input=controls.on_keyword() placeholder="Cari produk..." />
                {controls.facet_select("Pelaku Usaha", ProductFacet::PelakuUsaha, facet_choices(items, ProductFacet::PelakuUsaha))}
                <ResetFiltersButton active_count=controls.active_count() on_reset=controls.on_reset() />
                <ExportButtons title="Data Produk" rows=controls.export_rows(items) />
            </div>

            <BulkDeleteBar kind=KIND group_id=group_id selection=selection on_deleted=refresh />
            <ListStatus items=items filtered_total=controls.filtered_total(page) />

            <table class="data-table">
                <thead>
                    <tr>
                        <th class="select-col"><PageCheckbox ids=page_ids selection=selection /></th>
                        <th>"Foto"</th>
                        <SortHeader label="Nama" column=ProductSortKey::Nama sort=controls.sort() on_sort=controls.on_sort() />
                        <SortHeader label="Harga" column=ProductSortKey::Harga sort=controls.sort() on_sort=controls.on_sort() />
                        <th>"Pelaku Usaha"</th>
                        <th>"Deskripsi"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || page.get().rows
                        key=|product| product.id
                        children=move |product| {
                            let id = product.id;
                            let photo = product.foto.as_deref().map(|file| config.upload_url(file));
                            view! {
                                <tr>
                                    <td><RowCheckbox id=id selection=selection /></td>
                                    <td>
                                        {photo.map(|src| view! { <img class="thumb" src=src alt="Foto produk" /> })}
                                    </td>
                                    <td>{product.nama.clone()}</td>
                                    <td>{price_range(&product)}</td>
                                    <td>{format::text(product.pemilik())}</td>
                                    <td class="description">{format::text(product.deskripsi.as_deref())}</td>
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
