//! Web layer: the Interaction Shell.
//!
//! Owns session state (query, selection, cached board) and re-renders the
//! dashboard on every action. The core stays pure; everything stateful or
//! fallible at the user boundary lives here.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, BoardSnapshot, Session};
