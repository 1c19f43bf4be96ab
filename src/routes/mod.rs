//! Client-Side Routing
//!
//! The route table maps URL paths to the dashboard's pages:
//!
//! - **page**: The closed set of renderable pages
//! - **table**: Route bindings, table construction and path resolution
//! - **error**: Resolution and table-construction errors
//!
//! # Resolution
//!
//! ```text
//!   path → exact match → Page                 (done)
//!                      → Redirect(to) → path  (repeat, cycle guarded)
//!        → no match    → NotFound
//! ```
//!
//! # Example
//!
//! ```rust
//! use digital_economy::routes::{Page, RouteTable};
//!
//! let table = RouteTable::standard();
//! let resolution = table.resolve("/").unwrap();
//! assert_eq!(resolution.page, Page::Synergy);
//! assert_eq!(resolution.path, "/synergy");
//! ```

pub mod error;
pub mod page;
pub mod table;

pub use error::{RouteError, RouteTableError};
pub use page::Page;
pub use table::{Resolution, RouteBinding, RouteTable, RouteTarget, DEFAULT_LANDING};
