//! Pages
//!
//! Top-level page components, one per routed page.

pub mod login;
pub mod manage;
pub mod overview;

pub use login::Login;
pub use manage::ArchiveManage;
pub use overview::Overview;
