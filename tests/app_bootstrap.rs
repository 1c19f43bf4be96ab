//! End-to-end bootstrap: compose the application, mount it, then drive the
//! router the way the browser does.

use digital_economy::{
    start, AppTree, Application, BootstrapError, Locale, MemoryHistory, MountHost,
    NavigationError, Page, RouteError, RouteTable, UiLibraryConfig, DEFAULT_MOUNT_SELECTOR,
};

/// Root component stand-in
#[derive(Debug, Clone, Copy, PartialEq)]
struct Root;

/// A document with a fixed set of element ids
struct Document {
    ids: Vec<&'static str>,
    mounted: Vec<(&'static str, Locale, usize)>,
}

impl Document {
    fn new(ids: &[&'static str]) -> Self {
        Self {
            ids: ids.to_vec(),
            mounted: Vec::new(),
        }
    }
}

impl MountHost<Root> for Document {
    type Element = &'static str;

    fn select(&self, selector: &str) -> Vec<&'static str> {
        self.ids
            .iter()
            .copied()
            .filter(|id| selector.strip_prefix('#') == Some(*id))
            .collect()
    }

    fn attach(&mut self, element: &'static str, tree: AppTree<Root>) -> Result<(), BootstrapError> {
        self.mounted.push((element, tree.ui.locale, tree.router.len()));
        Ok(())
    }
}

#[test]
fn manage_resolves_to_archive_management_after_start() {
    let mut document = Document::new(&["app"]);
    let app = start(
        Root,
        RouteTable::standard(),
        UiLibraryConfig::default(),
        DEFAULT_MOUNT_SELECTOR,
        &mut document,
    )
    .unwrap();

    assert_eq!(document.mounted, vec![("app", Locale::ZhCn, 6)]);

    let resolution = app.resolve("/manage").unwrap();
    assert_eq!(resolution.page, Page::ArchiveManage);
    assert!(!resolution.is_redirected());
}

#[test]
fn every_configured_path_resolves_to_its_own_page() {
    let table = RouteTable::standard();
    let pages: Vec<_> = ["/resource", "/service", "/synergy", "/manage", "/login"]
        .iter()
        .map(|p| table.resolve(p).unwrap().page)
        .collect();

    assert_eq!(
        pages,
        vec![
            Page::Resource,
            Page::Service,
            Page::Synergy,
            Page::ArchiveManage,
            Page::Login
        ]
    );
}

#[test]
fn root_is_transparent_redirect_to_synergy() {
    let table = RouteTable::standard();
    let root = table.resolve("/").unwrap();
    let synergy = table.resolve("/synergy").unwrap();
    assert_eq!((root.page, root.path), (synergy.page, synergy.path));
}

#[test]
fn paths_outside_the_table_are_not_found() {
    let table = RouteTable::standard();
    for path in ["/admin", "/synergy/1", "/login/", "//", "/RESOURCE"] {
        assert_eq!(
            table.resolve(path).unwrap_err(),
            RouteError::NotFound(path.to_string())
        );
    }
}

#[test]
fn bootstrap_without_mount_point_fails_every_time() {
    for _ in 0..3 {
        let mut document = Document::new(&["main"]);
        let err = Application::create(Root)
            .use_ui_library(UiLibraryConfig::default())
            .use_router(RouteTable::standard())
            .mount(&mut document, "#app")
            .unwrap_err();

        assert_eq!(err, BootstrapError::MountPointNotFound("#app".to_string()));
        assert!(document.mounted.is_empty());
    }
}

#[test]
fn navigation_after_mount_is_last_wins() {
    let mut document = Document::new(&["app"]);
    let app = start(
        Root,
        RouteTable::standard(),
        UiLibraryConfig::default(),
        "#app",
        &mut document,
    )
    .unwrap();

    let mut navigator = app.navigator(MemoryHistory::new());
    let slow = navigator.navigate("/resource").unwrap();
    let fast = navigator.navigate("/").unwrap();

    assert!(matches!(
        navigator.complete(slow),
        Err(NavigationError::Superseded { .. })
    ));
    assert_eq!(navigator.complete(fast).unwrap().page, Page::Synergy);
    assert_eq!(navigator.history().entries(), ["/resource", "/synergy"]);
}
