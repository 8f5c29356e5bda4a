//! Music Advisor Library
//!
//! An interactive console client for the Spotify catalog. The library holds the
//! OAuth2 authorization-code handshake (a short-lived local listener that
//! captures the browser redirect, followed by the token exchange) and the
//! page cursors used to walk the browse collections forwards and backwards.
//!
//! # Modules
//!
//! - `api` - HTTP handler for the local redirect listener
//! - `cli` - Command parsing, dispatching and the interactive loop
//! - `config` - Settings from the environment and `.env` files
//! - `error` - Classified, recoverable errors
//! - `management` - Session and pagination state
//! - `server` - The authorization code listener
//! - `spotify` - Spotify Web API and accounts service clients
//! - `types` - Data structures and type definitions
//! - `utils` - URL and credential helpers
//!
//! # Example
//!
//! ```
//! use musicadvisor::{cli, config};
//!
//! #[tokio::main]
//! async fn main() -> musicadvisor::Res<()> {
//!     config::load_env().await?;
//!     let settings = config::Settings::from_env()?;
//!     cli::run(settings).await
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used for failures that escalate past the command loop, such as a listener
/// port that cannot be bound. Recoverable failures use
/// [`error::AdvisorError`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Waiting for the authorization code...");
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for failures the client cannot recover from, e.g. missing credentials
/// at startup. Everything raised while a command runs is reported with
/// [`warning!`] and the loop continues.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("No more pages.");
/// warning!("Token exchange failed with status {}", status);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
