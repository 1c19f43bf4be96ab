//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod grade;
pub mod loading;
pub mod nav;
pub mod toast;

pub use grade::GradeBadge;
pub use loading::{CardSkeleton, ErrorPanel, Loading};
pub use nav::Nav;
pub use toast::Toast;
