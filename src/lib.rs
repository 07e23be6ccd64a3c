//! Spotify Token Relay Library
//!
//! This library provides the pieces of a small relay service that brokers a
//! single Spotify OAuth2 credential on behalf of a client application. It
//! handles the authorization-code exchange, keeps the resulting bearer token in
//! memory and hands out only tokens that are still valid.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for login, callback, status and profile lookup
//! - `config` - Configuration management and environment variables
//! - `error` - Error types shared by the token manager and the HTTP layer
//! - `management` - The in-memory token lifecycle manager
//! - `server` - Router construction and the HTTP server loop
//! - `spotify` - Spotify accounts and Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotrelay::{config, management::TokenManager, spotify::auth::SpotifyAuthClient};
//!
//! #[tokio::main]
//! async fn main() -> spotrelay::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     let tokens = TokenManager::new(SpotifyAuthClient::new(&config, reqwest::Client::new()));
//!     assert!(tokens.get_token().await.is_none());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Boxed-error result used by the binary and other top-level entry points.
///
/// Library code returns the typed errors from [`error`] and [`config`]; this
/// alias lets the server entry point `?` across those and I/O errors alike.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// info!("Open {} to authorize", login_url);
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Creates a formatted output line with a green "✓" indicator to signify
/// successful completion of operations. Used to provide positive feedback
/// when operations complete successfully.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// success!("Relay is up");
/// success!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Used for unrecoverable errors
/// that require immediate program termination.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Behavior
///
/// This macro will cause the program to exit immediately after printing
/// the error message. It should only be used for fatal errors where
/// recovery is not possible.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// error!("Cannot bind {}: {}", addr, err);
/// // Program exits here - code after this will not execute
/// ```
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
/// Creates a formatted output line with a yellow "!" indicator to highlight
/// potential issues or important notices that don't require program termination.
/// Used for recoverable issues or important information that users should notice.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// warning!("No .env file found, using process environment only");
/// warning!("Failed to open browser, visit {} manually", url);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
