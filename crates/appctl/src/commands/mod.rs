//! CLI command implementations.
//!
//! - [`action`] - the application lifecycle operations and their rendering
//! - [`app`] - the executor that sends one request per action

pub mod action;
pub mod app;

pub use action::{Action, StatusPolicy};
pub use app::AppCommand;
