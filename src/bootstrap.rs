//! Application Bootstrap
//!
//! Composes the application root, the UI component library and the router,
//! then mounts the result onto a host element.
//!
//! The composition steps are order-sensitive, so the builder encodes them as
//! type states:
//!
//! ```text
//! Application::create(root)        Application<R, Created>
//!     .use_ui_library(config)      Application<R, WithUiLibrary>
//!     .use_router(table)           Application<R, WithRouter>
//!     .mount(&mut host, "#app")    MountedApp
//! ```
//!
//! Only `Application<R, WithRouter>` has a `mount` method, and `mount`
//! consumes the builder, so an application is mounted at most once.
//!
//! # Example
//!
//! ```rust,ignore
//! use digital_economy::bootstrap::Application;
//! use digital_economy::routes::RouteTable;
//! use digital_economy::ui::UiLibraryConfig;
//!
//! let app = Application::create(App)
//!     .use_ui_library(UiLibraryConfig::default())
//!     .use_router(RouteTable::standard())
//!     .mount(&mut DomHost, "#app")?;
//! ```

use std::sync::Arc;
use thiserror::Error;

use crate::navigation::{History, Navigator};
use crate::routes::{Resolution, RouteError, RouteTable};
use crate::ui::{Locale, UiLibraryConfig};

/// Selector of the element the dashboard mounts onto
pub const DEFAULT_MOUNT_SELECTOR: &str = "#app";

/// Bootstrap errors. All of them are fatal: the UI cannot be presented.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BootstrapError {
    #[error("Mount selector is empty")]
    EmptySelector,

    #[error("No element matches mount selector {0:?}")]
    MountPointNotFound(String),

    #[error("Mount selector {selector:?} matches {count} elements, expected exactly one")]
    AmbiguousMountPoint { selector: String, count: usize },

    #[error("Failed to attach application: {0}")]
    Attach(String),
}

/// The environment an application is mounted into (a DOM, a test double)
pub trait MountHost<R> {
    type Element;

    /// All elements matching `selector`
    fn select(&self, selector: &str) -> Vec<Self::Element>;

    /// Attach the composed application tree to `element`
    fn attach(&mut self, element: Self::Element, tree: AppTree<R>) -> Result<(), BootstrapError>;
}

/// The fully composed application handed to [`MountHost::attach`]
pub struct AppTree<R> {
    pub root: R,
    pub ui: UiLibraryConfig,
    pub router: Arc<RouteTable>,
}

/// Root instantiated, nothing registered yet
pub struct Created;

/// UI component library registered
pub struct WithUiLibrary {
    ui: UiLibraryConfig,
}

/// UI component library and router registered, ready to mount
pub struct WithRouter {
    ui: UiLibraryConfig,
    router: Arc<RouteTable>,
}

/// Application builder
pub struct Application<R, S = Created> {
    root: R,
    state: S,
}

impl<R> Application<R, Created> {
    /// Instantiate the application from its root component
    pub fn create(root: R) -> Self {
        tracing::debug!("Application root created");
        Self {
            root,
            state: Created,
        }
    }

    /// Register the UI component library
    pub fn use_ui_library(self, ui: UiLibraryConfig) -> Application<R, WithUiLibrary> {
        tracing::info!(locale = %ui.locale, "UI library registered");
        Application {
            root: self.root,
            state: WithUiLibrary { ui },
        }
    }
}

impl<R> Application<R, WithUiLibrary> {
    /// Register the router so navigation resolves through `table`
    pub fn use_router(self, table: impl Into<Arc<RouteTable>>) -> Application<R, WithRouter> {
        let router = table.into();
        tracing::info!(routes = router.len(), "Router registered");
        Application {
            root: self.root,
            state: WithRouter {
                ui: self.state.ui,
                router,
            },
        }
    }
}

impl<R> Application<R, WithRouter> {
    /// Mount onto the single element matching `selector`
    pub fn mount<H>(self, host: &mut H, selector: &str) -> Result<MountedApp, BootstrapError>
    where
        H: MountHost<R>,
    {
        let selector = selector.trim();
        if selector.is_empty() {
            return Err(BootstrapError::EmptySelector);
        }

        let mut elements = host.select(selector);
        let element = match elements.len() {
            0 => {
                tracing::error!(selector = %selector, "Mount point not found");
                return Err(BootstrapError::MountPointNotFound(selector.to_string()));
            }
            1 => elements.remove(0),
            count => {
                tracing::error!(selector = %selector, count, "Mount point is ambiguous");
                return Err(BootstrapError::AmbiguousMountPoint {
                    selector: selector.to_string(),
                    count,
                });
            }
        };

        let WithRouter { ui, router } = self.state;
        let mounted = MountedApp {
            selector: selector.to_string(),
            ui: ui.clone(),
            router: Arc::clone(&router),
        };

        host.attach(
            element,
            AppTree {
                root: self.root,
                ui,
                router,
            },
        )?;

        tracing::info!(selector = %selector, "Application mounted");
        Ok(mounted)
    }
}

/// Handle to a mounted application
#[derive(Debug, Clone)]
pub struct MountedApp {
    selector: String,
    ui: UiLibraryConfig,
    router: Arc<RouteTable>,
}

impl MountedApp {
    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn locale(&self) -> Locale {
        self.ui.locale
    }

    pub fn router(&self) -> &Arc<RouteTable> {
        &self.router
    }

    /// Resolve a path through the registered router
    pub fn resolve(&self, path: &str) -> Result<Resolution, RouteError> {
        self.router.resolve(path)
    }

    /// Navigator bound to this application's router and the given history
    pub fn navigator<H: History>(&self, history: H) -> Navigator<H> {
        Navigator::new(Arc::clone(&self.router), history)
    }
}

/// Run the whole bootstrap sequence in order
pub fn start<R, H>(
    root: R,
    table: impl Into<Arc<RouteTable>>,
    ui: UiLibraryConfig,
    selector: &str,
    host: &mut H,
) -> Result<MountedApp, BootstrapError>
where
    H: MountHost<R>,
{
    Application::create(root)
        .use_ui_library(ui)
        .use_router(table)
        .mount(host, selector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::MemoryHistory;
    use crate::routes::Page;

    /// A host with a flat list of element ids; `#id` selects by id,
    /// `.all` selects everything.
    #[derive(Default)]
    struct FakeHost {
        ids: Vec<String>,
        attached: Vec<(String, &'static str, Locale)>,
        fail_attach: bool,
    }

    impl FakeHost {
        fn with_ids(ids: &[&str]) -> Self {
            Self {
                ids: ids.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            }
        }
    }

    impl MountHost<&'static str> for FakeHost {
        type Element = String;

        fn select(&self, selector: &str) -> Vec<String> {
            if selector == ".all" {
                return self.ids.clone();
            }
            self.ids
                .iter()
                .filter(|id| selector.strip_prefix('#') == Some(id.as_str()))
                .cloned()
                .collect()
        }

        fn attach(
            &mut self,
            element: String,
            tree: AppTree<&'static str>,
        ) -> Result<(), BootstrapError> {
            if self.fail_attach {
                return Err(BootstrapError::Attach("host refused".to_string()));
            }
            self.attached.push((element, tree.root, tree.ui.locale));
            Ok(())
        }
    }

    #[test]
    fn test_start_mounts_once() {
        let mut host = FakeHost::with_ids(&["app", "footer"]);
        let app = start(
            "App",
            RouteTable::standard(),
            UiLibraryConfig::default(),
            DEFAULT_MOUNT_SELECTOR,
            &mut host,
        )
        .unwrap();

        assert_eq!(host.attached.len(), 1);
        assert_eq!(host.attached[0], ("app".to_string(), "App", Locale::ZhCn));
        assert_eq!(app.selector(), "#app");
        assert_eq!(app.locale(), Locale::ZhCn);
    }

    #[test]
    fn test_missing_mount_point_is_fatal() {
        let mut host = FakeHost::with_ids(&["root"]);
        let err = start(
            "App",
            RouteTable::standard(),
            UiLibraryConfig::default(),
            "#app",
            &mut host,
        )
        .unwrap_err();

        assert_eq!(err, BootstrapError::MountPointNotFound("#app".to_string()));
        assert!(host.attached.is_empty());
    }

    #[test]
    fn test_ambiguous_mount_point_rejected() {
        let mut host = FakeHost::with_ids(&["a", "b"]);
        let err = start(
            "App",
            RouteTable::standard(),
            UiLibraryConfig::default(),
            ".all",
            &mut host,
        )
        .unwrap_err();

        assert_eq!(
            err,
            BootstrapError::AmbiguousMountPoint {
                selector: ".all".to_string(),
                count: 2
            }
        );
        assert!(host.attached.is_empty());
    }

    #[test]
    fn test_empty_selector_rejected() {
        let mut host = FakeHost::with_ids(&["app"]);
        let err = start(
            "App",
            RouteTable::standard(),
            UiLibraryConfig::default(),
            "  ",
            &mut host,
        )
        .unwrap_err();
        assert_eq!(err, BootstrapError::EmptySelector);
    }

    #[test]
    fn test_attach_failure_propagates() {
        let mut host = FakeHost::with_ids(&["app"]);
        host.fail_attach = true;

        let result = Application::create("App")
            .use_ui_library(UiLibraryConfig::default())
            .use_router(RouteTable::standard())
            .mount(&mut host, "#app");

        assert!(matches!(result, Err(BootstrapError::Attach(_))));
    }

    #[test]
    fn test_mounted_app_resolves_and_navigates() {
        let mut host = FakeHost::with_ids(&["app"]);
        let app = start(
            "App",
            RouteTable::standard(),
            UiLibraryConfig::new(Locale::EnUs),
            "#app",
            &mut host,
        )
        .unwrap();

        assert_eq!(app.resolve("/manage").unwrap().page, Page::ArchiveManage);
        assert_eq!(app.locale(), Locale::EnUs);

        let mut nav = app.navigator(MemoryHistory::new());
        let pending = nav.navigate("/").unwrap();
        assert_eq!(nav.complete(pending).unwrap().page, Page::Synergy);
    }
}
