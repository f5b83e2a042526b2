//! Remote List Loader
//!
//! Fetches a collection whenever its source signals change. Each fetch takes
//! a ticket; a response overtaken by a newer fetch is dropped.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;
use list_view::{LoadState, RequestSequence};

use crate::api::ApiClient;
use crate::context::use_app_context;
use crate::error::ApiResult;

/// Load state of a remote collection, refetched when `source` changes
pub fn use_remote_list<S, T, F, Fut>(
    label: &'static str,
    source: impl Fn() -> S + 'static,
    fetch: F,
) -> RwSignal<LoadState<T>>
where
    S: 'static,
    T: Send + Sync + 'static,
    F: Fn(ApiClient, S) -> Fut + 'static,
    Fut: Future<Output = ApiResult<Vec<T>>> + 'static,
{
    let ctx = use_app_context();
    let state = RwSignal::new(LoadState::<T>::Loading);
    let sequence = StoredValue::new(RequestSequence::new());

    Effect::new(move |_| {
        let key = source();
        let ticket = sequence.with_value(|s| s.issue());
        state.set(LoadState::Loading);
        let request = fetch(ctx.api(), key);

        spawn_local(async move {
            let result = request.await;
            if !sequence.try_with_value(|s| s.is_current(ticket)).unwrap_or(false) {
                log::debug!("[{}] Dropped stale response", label);
                return;
            }
            match &result {
                Ok(items) => log::info!("[{}] Loaded {} rows", label, items.len()),
                Err(e) => ctx.report_error("Gagal memuat data", e),
            }
            state.try_set(LoadState::from(result));
        });
    });

    on_cleanup(move || {
        sequence.try_with_value(|s| s.invalidate());
    });

    state
}
