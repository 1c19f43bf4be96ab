//! Digital Economy Dashboard
//!
//! Ecosystem evaluation dashboard built with Leptos (WASM).
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. Startup runs the shared bootstrap sequence: the UI library
//! settings (zh-CN locale) and the route table are installed on the root
//! component, which is then mounted on `#app`. It talks to the evaluation
//! backend over HTTP.

use digital_economy::{
    start, AppTree, BootstrapError, MountHost, RouteTable, UiLibraryConfig,
    DEFAULT_MOUNT_SELECTOR,
};
use leptos::*;
use wasm_bindgen::JsCast;

mod api;
mod app;
mod components;
mod pages;
mod state;

use app::RootView;

/// The browser document as a mount host
struct DomHost {
    document: web_sys::Document,
}

impl DomHost {
    fn new() -> Result<Self, BootstrapError> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(|document| Self { document })
            .ok_or_else(|| BootstrapError::Attach("no document available".to_string()))
    }
}

impl MountHost<RootView> for DomHost {
    type Element = web_sys::HtmlElement;

    fn select(&self, selector: &str) -> Vec<Self::Element> {
        let nodes = match self.document.query_selector_all(selector) {
            Ok(nodes) => nodes,
            Err(e) => {
                web_sys::console::error_1(&e);
                return Vec::new();
            }
        };

        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
            .collect()
    }

    fn attach(
        &mut self,
        element: Self::Element,
        tree: AppTree<RootView>,
    ) -> Result<(), BootstrapError> {
        let AppTree { root, ui, router } = tree;
        mount_to(element, move || root(ui, router));
        Ok(())
    }
}

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    let result = DomHost::new().and_then(|mut host| {
        start(
            app::root as RootView,
            RouteTable::standard(),
            UiLibraryConfig::default(),
            DEFAULT_MOUNT_SELECTOR,
            &mut host,
        )
    });

    if let Err(e) = result {
        let message = format!("Failed to start application: {}", e);
        web_sys::console::error_1(&message.as_str().into());
        wasm_bindgen::throw_str(&message);
    }
}
