//! # appctl
//!
//! Command-line client for a cluster orchestrator's application API.
//!
//! Provides commands for:
//! - Listing applications and their versions
//! - Showing an application version
//! - Creating, updating, restarting and destroying applications
//!
//! # Architecture
//!
//! Every subcommand maps to one [`commands::Action`]. The
//! [`commands::AppCommand`] executor builds the action's request, sends it
//! through a [`client::Transport`], checks the status code and renders the
//! body through the [`output::Formatter`], either verbatim or as aligned
//! columns produced by [`columnize::columnize`].
//!
//! ```text
//! ┌──────────┐   one request   ┌───────────┐   HTTP/JSON   ┌──────────────┐
//! │  Action  │────────────────►│ Transport │◄─────────────►│ orchestrator │
//! └──────────┘                 └───────────┘               └──────────────┘
//!       │ body
//!       ▼
//! ┌───────────┐  raw | human   ┌────────┐
//! │ Formatter │───────────────►│ stdout │
//! └───────────┘                └────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod cli;
pub mod client;
pub mod columnize;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::{Cli, Commands, Format};
pub use client::{HttpClient, Transport};
pub use commands::{Action, AppCommand};
pub use error::CliError;
pub use output::Formatter;
