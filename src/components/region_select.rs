//! Kabupaten Select Component
//!
//! Server-side district narrowing, fed by the static region files.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::use_app_context;
use crate::models::Region;

/// Single kabupaten choice; empty means all districts. `on_change` runs
/// after every pick so the screen can drop region facets of the old district.
#[component]
pub fn KabupatenSelect(
    selected: RwSignal<Option<String>>,
    #[prop(into)] on_change: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let (regions, set_regions) = signal(Vec::<Region>::new());

    // Load once on mount
    Effect::new(move |_| {
        let province = ctx.config().province_id;
        spawn_local(async move {
            match api::list_kabupaten(&ctx.api(), &province).await {
                Ok(loaded) => {
                    log::debug!("[KabupatenSelect] Loaded {} kabupaten", loaded.len());
                    set_regions.try_set(loaded);
                }
                Err(e) => log::warn!("[KabupatenSelect] Region list unavailable: {}", e),
            }
        });
    });

    view! {
        <select
            class="region-select"
            on:change=move |ev| {
                let value = event_target_value(&ev);
                selected.set(if value.is_empty() { None } else { Some(value) });
                on_change.run(());
            }
        >
            <option value="" selected=move || selected.get().is_none()>"Semua kabupaten"</option>
            <For
                each=move || regions.get()
                key=|region| region.id.clone()
                children=move |region| {
                    let nama = region.nama;
                    let value = nama.clone();
                    let label = nama.clone();
                    let is_selected = move || selected.get().as_deref() == Some(nama.as_str());
                    view! {
                        <option value=value selected=is_selected>{label}</option>
                    }
                }
            />
        </select>
    }
}
