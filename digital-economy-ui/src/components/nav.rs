//! Navigation Component
//!
//! Header navigation bar built from the route table.

use std::sync::Arc;

use digital_economy::routes::DEFAULT_LANDING;
use digital_economy::{Page, RouteTable};
use leptos::*;
use leptos_router::*;

use crate::state::global::GlobalState;

/// Navigation entries: the first path bound to each navigable page
pub fn nav_links(table: &RouteTable) -> Vec<(String, &'static str)> {
    Page::ALL
        .into_iter()
        .filter(|page| page.in_navigation())
        .filter_map(|page| {
            table
                .path_of(page)
                .map(|path| (path.to_string(), page.title()))
        })
        .collect()
}

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let table = use_context::<Arc<RouteTable>>().expect("RouteTable not found");
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let login_path = table.path_of(Page::Login).unwrap_or("/login").to_string();

    view! {
        <nav class="nav">
            <A href=DEFAULT_LANDING class="nav-brand">
                "数字经济生态评价"
            </A>

            <div class="nav-links">
                {nav_links(&table)
                    .into_iter()
                    .map(|(href, label)| view! { <NavLink href=href label=label /> })
                    .collect_view()}
            </div>

            <div class="nav-user">
                {move || match state.username.get() {
                    Some(name) => {
                        let state = state.clone();
                        view! {
                            <span class="nav-username">{name}</span>
                            <button class="nav-logout" on:click=move |_| state.sign_out()>
                                "退出"
                            </button>
                        }
                        .into_view()
                    }
                    None => view! {
                        <A href=login_path.clone() class="nav-login">"登录"</A>
                    }
                    .into_view(),
                }}
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: String,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A href=href class="nav-link" active_class="nav-link-active">
            {label}
        </A>
    }
}
