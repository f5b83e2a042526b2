//! Login Form Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::use_app_context;

#[component]
pub fn LoginForm() -> impl IntoView {
    let ctx = use_app_context();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (busy, set_busy) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email = email.get();
        let password = password.get();
        set_busy.set(true);
        set_error.set(None);

        spawn_local(async move {
            match api::login(&ctx.api(), &email, &password).await {
                Ok(()) => {
                    set_password.set(String::new());
                    ctx.login_succeeded();
                    ctx.notify_success("Berhasil masuk");
                }
                Err(e) => {
                    log::warn!("[LoginForm] Login failed: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <form class="login-form" on:submit=submit>
                <h1>"Desa Prima"</h1>
                <p class="login-subtitle">"Masuk sebagai administrator"</p>

                <label>
                    "Email"
                    <input
                        type="email"
                        autocomplete="username"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Kata sandi"
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </label>

                {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}

                <button type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Memproses..." } else { "Masuk" }}
                </button>
            </form>
        </div>
    }
}
