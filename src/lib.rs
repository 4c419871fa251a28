//! MovieFinder - search the Open Movie Database from your terminal
//!
//! A search screen with filters and paging, and a detail screen per title,
//! backed by the OMDb REST API.
//!
//! # Modules
//!
//! - `models` - Filters, search rows, detail records, routes
//! - `api` - OMDb client
//! - `app` - Screen state machine and key handling
//! - `fetch` - Background request tasks
//! - `ui` - TUI components
//! - `cli` / `commands` - Scriptable subcommands
//! - `config` - Config file and API key resolution

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod fetch;
pub mod models;
pub mod ui;

// Re-export commonly used types
pub use api::{ApiReply, OmdbClient, OmdbError};
pub use app::{App, AppMessage, Request, RequestOutcome, Screen};
pub use config::Config;
pub use models::{MediaType, MovieDetail, MovieSummary, Route, SearchFilters};
