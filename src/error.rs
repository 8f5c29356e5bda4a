use thiserror::Error;

/// Recoverable failures raised while a console command runs.
///
/// None of these end the process. The dispatcher turns each into a printed
/// message and reads the next command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdvisorError {
    /// Forward navigation past the last known page, or before any page was fetched.
    #[error("No more pages.")]
    NoMorePages,

    /// Backward navigation from the first page, or before any page was fetched.
    #[error("No previous pages.")]
    NoPreviousPages,

    /// `next`/`prev` on category playlists before a category was chosen.
    #[error("Specify a category first.")]
    CategoryNotSelected,

    #[error("Unknown category name: {0}")]
    UnknownCategory(String),

    /// Non-success response from the Spotify Web API or accounts service.
    ///
    /// `message` is taken from the error envelope when the body carries one,
    /// otherwise it is the raw body.
    #[error("{message} (status {status})")]
    Api { status: u16, message: String },

    /// Connection failures and bodies that could not be decoded.
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Invalid redirect URI: {0}")]
    InvalidRedirectUri(String),
}

impl From<reqwest::Error> for AdvisorError {
    fn from(e: reqwest::Error) -> Self {
        AdvisorError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for AdvisorError {
    fn from(e: serde_json::Error) -> Self {
        AdvisorError::Transport(e.to_string())
    }
}
