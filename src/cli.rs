//! CLI - Command Line Interface for MovieFinder
//!
//! Without a subcommand the interactive TUI starts. Subcommands run a single
//! request and print the result, as JSON when asked or when stdout is not a
//! terminal.
//!
//! # Examples
//!
//! ```bash
//! moviefinder                              # TUI on the search screen
//! moviefinder --route /movie/tt0096895     # TUI straight onto a detail screen
//! moviefinder search pokemon -t movie -p 2
//! moviefinder info tt0096895 --json
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::models::{MediaType, Route};

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    /// General error (config, serialization)
    Error = 1,
    InvalidArgs = 2,
    /// Transport failure talking to OMDb
    NetworkError = 3,
    /// OMDb answered with `Response: "False"`
    ApiError = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// MovieFinder - search the Open Movie Database from your terminal
///
/// Run without arguments to launch the interactive TUI.
#[derive(Parser, Debug)]
#[command(
    name = "moviefinder",
    version,
    about = "Search the Open Movie Database from your terminal",
    after_help = "EXAMPLES:\n\
                  moviefinder                            Launch interactive TUI\n\
                  moviefinder --route /movie/tt0096895   Open a title directly\n\
                  moviefinder search pokemon -t movie    Search from the shell\n\
                  moviefinder info tt0096895 --json      Look up one title\n\n\
                  The API key is read from OMDB_API_KEY or the config file."
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Start the TUI on this route ("/" or "/movie/<imdb id>")
    #[arg(long, short = 'r', value_parser = parse_route)]
    pub route: Option<Route>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

fn parse_route(s: &str) -> Result<Route, String> {
    Route::parse(s).ok_or_else(|| format!("unknown route '{}' (expected / or /movie/<id>)", s))
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search titles
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Show details for one title
    #[command(visible_alias = "i")]
    Info(InfoCmd),
}

/// Search by title text
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Title text to search for
    #[arg(required = true)]
    pub query: String,

    /// Restrict to a media type
    #[arg(long = "type", short = 't', value_enum)]
    pub media_type: Option<TypeFilter>,

    /// Release year (0 means any)
    #[arg(long, short = 'y')]
    pub year: Option<u16>,

    /// Result page, starting at 1
    #[arg(long, short = 'p', default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,
}

/// Media type filter for search
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFilter {
    Movie,
    Series,
    Episode,
}

impl From<Option<TypeFilter>> for MediaType {
    fn from(filter: Option<TypeFilter>) -> Self {
        match filter {
            None => MediaType::All,
            Some(TypeFilter::Movie) => MediaType::Movie,
            Some(TypeFilter::Series) => MediaType::Series,
            Some(TypeFilter::Episode) => MediaType::Episode,
        }
    }
}

/// Look up one title by its IMDb id
#[derive(Args, Debug)]
pub struct InfoCmd {
    /// IMDb id (e.g., tt0096895)
    #[arg(required = true)]
    pub id: String,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonError>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonError {
    pub message: String,
    pub code: i32,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(JsonError {
                message: msg.into(),
                code: code.into(),
            }),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data. `text` renders the human-readable form.
    pub fn print<T: Serialize>(&self, data: &T, text: impl FnOnce(&T) -> String) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&JsonOutput::success(data))?);
        } else {
            println!("{}", text(data));
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}
