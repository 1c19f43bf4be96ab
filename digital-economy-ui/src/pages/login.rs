//! Login Page

use digital_economy::routes::DEFAULT_LANDING;
use leptos::*;
use leptos_router::*;

use crate::state::global::GlobalState;

/// Validate the login form; returns the trimmed user name
pub fn validate_login(username: &str, password: &str) -> Result<String, &'static str> {
    let username = username.trim();
    if username.is_empty() {
        return Err("请输入用户名");
    }
    if password.is_empty() {
        return Err("请输入密码");
    }
    Ok(username.to_string())
}

#[component]
pub fn Login() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let username = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        match validate_login(&username.get(), &password.get()) {
            Ok(name) => {
                state.sign_in(&name);
                password.set(String::new());
                navigate(DEFAULT_LANDING, Default::default());
            }
            Err(message) => state.show_error(message),
        }
    };

    view! {
        <div class="page login">
            <form class="card login-form" on:submit=on_submit>
                <h1>"数字经济生态评价系统"</h1>
                <label>
                    "用户名"
                    <input
                        type="text"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "密码"
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit">"登录"</button>
            </form>
        </div>
    }
}
