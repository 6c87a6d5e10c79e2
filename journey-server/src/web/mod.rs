//! Web layer for the Van Journey dashboard.
//!
//! Serves the landing, dashboard and journal pages, plus the JSON endpoints
//! the dashboard map and journal editor call.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
