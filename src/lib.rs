//! hornero - bakery administration dashboard library.
//!
//! This library provides the pieces shared by the `hornero` terminal dashboard:
//! - `table` - generic tabular data engine (sort, filter, paging, selection)
//! - `session` - process-wide session context with change notifications
//! - `backend` - request wrapper and the local JSON record store
//! - `models` - bakery entities rendered by the dashboard
//! - `tui` - interactive terminal front end

pub mod backend;
pub mod error;
pub mod models;
pub mod session;
pub mod table;
pub mod tui;
pub mod util;

pub use error::{Error, Result};
