//! Page definitions
//!
//! Every renderable route target is one variant of [`Page`]. The browser
//! front-end maps each variant to a component with a single `match`, so adding
//! a page is a compile error until every renderer handles it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A renderable page of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    /// Resource subsystem overview
    Resource,
    /// Service subsystem overview
    Service,
    /// Collaborative (synergy) subsystem overview, the default landing page
    Synergy,
    /// Archive management: create, edit and delete evaluation records
    ArchiveManage,
    /// Login form
    Login,
}

impl Page {
    /// All pages, in route-table order
    pub const ALL: [Page; 5] = [
        Page::Resource,
        Page::Service,
        Page::Synergy,
        Page::ArchiveManage,
        Page::Login,
    ];

    /// Stable identifier used in logs and CLI output
    pub fn name(&self) -> &'static str {
        match self {
            Page::Resource => "resource",
            Page::Service => "service",
            Page::Synergy => "synergy",
            Page::ArchiveManage => "archive_manage",
            Page::Login => "login",
        }
    }

    /// Human-readable title shown in the navigation bar
    pub fn title(&self) -> &'static str {
        match self {
            Page::Resource => "资源子系统",
            Page::Service => "服务子系统",
            Page::Synergy => "协同子系统",
            Page::ArchiveManage => "档案管理",
            Page::Login => "登录",
        }
    }

    /// Whether the page belongs in the main navigation bar
    pub fn in_navigation(&self) -> bool {
        !matches!(self, Page::Login)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = Page::ALL.iter().map(|p| p.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Page::ALL.len());
    }

    #[test]
    fn test_login_hidden_from_navigation() {
        assert!(!Page::Login.in_navigation());
        assert!(Page::Synergy.in_navigation());
    }
}
