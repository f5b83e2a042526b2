//! Export Buttons Component
//!
//! Excel, CSV and PDF downloads of whatever rows the screen currently shows.

use chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::export::{self, ExportError, Exportable, CSV_MIME, PDF_MIME, XLSX_MIME};

#[component]
pub fn ExportButtons<T>(
    #[prop(into)] title: String,
    /// Filtered and sorted rows at click time
    rows: Callback<(), Vec<T>>,
) -> impl IntoView
where
    T: Exportable + Send + Sync + 'static,
{
    let ctx = use_app_context();
    let title = StoredValue::new(title);
    let (pdf_busy, set_pdf_busy) = signal(false);

    // synchronous formats, built and saved on click
    let export_with = move |extension: &'static str,
                            mime: &'static str,
                            build: fn(&[&T]) -> Result<Vec<u8>, ExportError>| {
        let rows = rows.run(());
        let refs: Vec<&T> = rows.iter().collect();
        let file_name = export::export_file_name(&title.get_value(), extension, Local::now().date_naive());
        let result = build(&refs).and_then(|bytes| export::save_bytes(&bytes, &file_name, mime));
        if let Err(e) = result {
            ctx.notify_error(e.to_string());
        }
    };

    let export_xlsx = move |_| export_with("xlsx", XLSX_MIME, export::to_xlsx::<T>);
    let export_csv = move |_| export_with("csv", CSV_MIME, export::to_csv::<T>);

    let export_pdf = move |_| {
        if pdf_busy.get() {
            return;
        }
        let rows = rows.run(());
        let title = title.get_value();
        set_pdf_busy.set(true);

        spawn_local(async move {
            let result = match export::fetch_fonts(&ctx.api()).await {
                Ok(fonts) => {
                    let refs: Vec<&T> = rows.iter().collect();
                    let file_name = export::export_file_name(&title, "pdf", Local::now().date_naive());
                    export::to_pdf(&title, &refs, &fonts)
                        .and_then(|bytes| export::save_bytes(&bytes, &file_name, PDF_MIME))
                }
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                ctx.notify_error(e.to_string());
            }
            set_pdf_busy.try_set(false);
        });
    };

    view! {
        <div class="export-buttons">
            <button class="export-btn" on:click=export_xlsx>"Excel"</button>
            <button class="export-btn" on:click=export_csv>"CSV"</button>
            <button class="export-btn" disabled=move || pdf_busy.get() on:click=export_pdf>
                {move || if pdf_busy.get() { "Menyusun PDF..." } else { "PDF" }}
            </button>
        </div>
    }
}
