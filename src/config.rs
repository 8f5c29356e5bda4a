//! Configuration management for Music Advisor.
//!
//! Settings come from environment variables, which may be provided through a
//! `.env` file in the local data directory. Command-line flags parsed in
//! `main.rs` override individual values afterwards.
//!
//! The lookup order is:
//! 1. Command-line flags (highest priority)
//! 2. Environment variables
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use crate::Res;

pub const DEFAULT_ACCESS_SERVER: &str = "https://accounts.spotify.com";
pub const DEFAULT_RESOURCE_SERVER: &str = "https://api.spotify.com";
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8080";
pub const DEFAULT_PAGE_SIZE: u32 = 5;
pub const DEFAULT_COUNTRY: &str = "US";
pub const DEFAULT_LOCALE: &str = "en_US";
pub const DEFAULT_AUTH_TIMEOUT: Duration = Duration::from_secs(60);

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives in:
/// - Linux: `~/.local/share/musicadvisor/.env`
/// - macOS: `~/Library/Application Support/musicadvisor/.env`
/// - Windows: `%LOCALAPPDATA%/musicadvisor/.env`
///
/// A missing file is not an error, the process environment is used as is.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or an existing `.env`
/// file cannot be parsed.
pub async fn load_env() -> Res<()> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path)?;
    }
    Ok(())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("musicadvisor/.env");
    path
}

/// Runtime settings for one client process.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the accounts service, e.g. `https://accounts.spotify.com`.
    pub access_server: String,
    /// Base URL of the Web API, e.g. `https://api.spotify.com`.
    pub resource_server: String,
    pub client_id: String,
    pub client_secret: String,
    /// Must match a redirect URI registered for the application. Its port is
    /// where the authorization code listener binds.
    pub redirect_uri: String,
    pub page_size: u32,
    pub country: String,
    pub locale: String,
    pub auth_timeout: Duration,
    pub open_browser: bool,
}

impl Settings {
    /// Builds settings from the environment.
    ///
    /// `SPOTIFY_API_AUTH_CLIENT_ID` and `SPOTIFY_API_AUTH_CLIENT_SECRET` are
    /// required; everything else falls back to a default.
    pub fn from_env() -> Res<Self> {
        let page_size = match env::var("MUSICADVISOR_PAGE_SIZE") {
            Ok(v) => v.parse::<u32>()?,
            Err(_) => DEFAULT_PAGE_SIZE,
        };
        let auth_timeout = match env::var("MUSICADVISOR_AUTH_TIMEOUT_SECS") {
            Ok(v) => Duration::from_secs(v.parse::<u64>()?),
            Err(_) => DEFAULT_AUTH_TIMEOUT,
        };

        let settings = Settings {
            access_server: optional("SPOTIFY_ACCESS_SERVER", DEFAULT_ACCESS_SERVER),
            resource_server: optional("SPOTIFY_RESOURCE_SERVER", DEFAULT_RESOURCE_SERVER),
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            redirect_uri: optional("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI),
            page_size,
            country: optional("MUSICADVISOR_COUNTRY", DEFAULT_COUNTRY),
            locale: optional("MUSICADVISOR_LOCALE", DEFAULT_LOCALE),
            auth_timeout,
            open_browser: false,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Rejects values the client cannot work with.
    pub fn validate(&self) -> Res<()> {
        if self.page_size == 0 {
            return Err("page size must be at least 1".into());
        }
        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err("client id and client secret must not be empty".into());
        }
        Ok(())
    }

    /// The accounts service authorization endpoint the browser is sent to.
    pub fn authorize_endpoint(&self) -> String {
        format!("{}/authorize", self.access_server.trim_end_matches('/'))
    }

    /// The accounts service endpoint that trades a code for a token.
    pub fn token_endpoint(&self) -> String {
        format!("{}/api/token", self.access_server.trim_end_matches('/'))
    }
}

fn required(name: &str) -> Res<String> {
    env::var(name).map_err(|_| format!("{} must be set", name).into())
}

fn optional(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}
