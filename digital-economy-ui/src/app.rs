//! App Root Component
//!
//! Router shell and global providers. Paths are resolved through the
//! shared [`RouteTable`] rather than per-page `<Route>` declarations, so the
//! browser and the native tooling agree on every binding.

use std::sync::Arc;

use digital_economy::navigation::strip_query_and_fragment;
use digital_economy::{Page, RouteError, RouteTable, Subsystem, UiLibraryConfig};
use leptos::*;
use leptos_router::*;

use crate::components::{Nav, Toast};
use crate::pages::{ArchiveManage, Login, Overview};
use crate::state::global::provide_global_state;

/// Root view factory handed to the bootstrap
pub type RootView = fn(UiLibraryConfig, Arc<RouteTable>) -> View;

pub fn root(ui: UiLibraryConfig, router: Arc<RouteTable>) -> View {
    view! { <App ui=ui router=router /> }.into_view()
}

/// Root application component
#[component]
pub fn App(ui: UiLibraryConfig, router: Arc<RouteTable>) -> impl IntoView {
    provide_global_state(ui.locale);
    provide_context(router);

    view! {
        <Router>
            <div class="app-shell" lang=ui.locale.tag()>
                <Nav />

                <main class="app-main">
                    <RouterView />
                </main>

                <Toast />
            </div>
        </Router>
    }
}

/// Renders the page the current location resolves to
#[component]
fn RouterView() -> impl IntoView {
    let table = use_context::<Arc<RouteTable>>().expect("RouteTable not found");
    let location = use_location();
    let navigate = use_navigate();

    let resolution = create_memo(move |_| table.resolve(strip_query_and_fragment(&location.pathname.get())));
    let page = create_memo(move |_| resolution.get().map(|r| r.page));

    // Show the redirect target in the address bar without a history entry
    create_effect(move |_| {
        if let Ok(resolution) = resolution.get() {
            if resolution.is_redirected() {
                navigate(
                    &resolution.path,
                    NavigateOptions {
                        replace: true,
                        ..Default::default()
                    },
                );
            }
        }
    });

    move || match page.get() {
        Ok(page) => render_page(page),
        Err(RouteError::NotFound(path)) => {
            web_sys::console::warn_1(&format!("No route for {}", path).into());
            ().into_view()
        }
        Err(e) => {
            web_sys::console::error_1(&e.to_string().into());
            view! { <p class="route-error">{e.to_string()}</p> }.into_view()
        }
    }
}

fn render_page(page: Page) -> View {
    match page {
        Page::Resource => view! { <Overview subsystem=Subsystem::Resource /> }.into_view(),
        Page::Service => view! { <Overview subsystem=Subsystem::Service /> }.into_view(),
        Page::Synergy => view! { <Overview subsystem=Subsystem::Collaborative /> }.into_view(),
        Page::ArchiveManage => view! { <ArchiveManage /> }.into_view(),
        Page::Login => view! { <Login /> }.into_view(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_paths_resolve_to_pages() {
        let table = RouteTable::standard();
        let resolve = |path: &str| table.resolve(strip_query_and_fragment(path)).map(|r| r.page);

        assert_eq!(resolve("/manage"), Ok(Page::ArchiveManage));
        assert_eq!(resolve("/?from=login"), Ok(Page::Synergy));
        assert_eq!(resolve("/synergy#top"), Ok(Page::Synergy));
        assert!(matches!(resolve("/nowhere"), Err(RouteError::NotFound(_))));
    }
}
