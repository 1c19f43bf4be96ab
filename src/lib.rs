//! # Digital Economy Dashboard
//!
//! Core of the ecosystem-evaluation dashboard: the route table, the
//! evaluation API client and the application bootstrap. The browser
//! front-end (`digital-economy-ui`) builds on this crate with
//! `default-features = false`.
//!
//! ## Modules
//!
//! - [`routes`]: Route table and path resolution
//! - [`navigation`]: History updates and last-navigation-wins rendering
//! - [`bootstrap`]: Ordered application composition and mounting
//! - [`client`]: Pre-configured HTTP client for the evaluation backend
//! - [`evaluation`]: Evaluation wire types
//! - [`ui`]: UI library settings (locale)
//! - [`config`], [`host`], [`logging`]: Native-only configuration, static
//!   SPA host and logging setup
//!
//! ## Quick Start
//!
//! ```rust
//! use digital_economy::routes::{Page, RouteTable};
//!
//! let table = RouteTable::standard();
//! assert_eq!(table.resolve("/manage").unwrap().page, Page::ArchiveManage);
//! assert_eq!(table.resolve("/").unwrap().page, Page::Synergy);
//! assert!(table.resolve("/missing").is_err());
//! ```

pub mod bootstrap;
pub mod client;
pub mod evaluation;
pub mod navigation;
pub mod routes;
pub mod ui;

#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod host;
#[cfg(feature = "native")]
pub mod logging;

// Re-export top-level types for convenience
pub use bootstrap::{
    start, AppTree, Application, BootstrapError, MountHost, MountedApp, DEFAULT_MOUNT_SELECTOR,
};

pub use client::{resolve_url, ClientConfig, RequestOverrides, DEFAULT_BASE_URL};

#[cfg(feature = "native")]
pub use client::{ApiClient, ClientError, ClientResult, EvaluationApi};

pub use evaluation::{
    BottomIndicators, DateRangeRecord, DateRangeResult, Grade, IndicatorInfo,
    IndicatorTrendPoint, IndicatorValue, OverallEvaluation, OverallEvaluationTrend,
    RadarChartData, RadarTrendData, Subsystem, TrainingData,
};

pub use navigation::{History, MemoryHistory, NavigationError, Navigator, PendingRender};

pub use routes::{
    Page, Resolution, RouteBinding, RouteError, RouteTable, RouteTableError, RouteTarget,
};

pub use ui::{Locale, UiLibraryConfig};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError};

#[cfg(feature = "native")]
pub use host::{build_router, serve, HostError, HostState};
