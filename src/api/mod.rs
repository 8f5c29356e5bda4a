//! # API Module
//!
//! HTTP handlers for the short-lived redirect listener started while the
//! user logs in.
//!
//! ## Endpoints
//!
//! - [`callback`] - Answers the browser redirect from the Spotify accounts
//!   service on any path, picks the `code` query parameter out of it and
//!   passes it on through a [`CodeSlot`].
//!
//! Both responses are `200 OK` with a short plain-text body, so the browser
//! tab tells the user whether to go back to the console or try again.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Extension, Router};
//! use musicadvisor::api::{CodeSlot, callback};
//!
//! let (tx, rx) = tokio::sync::oneshot::channel();
//! let slot: CodeSlot = Arc::new(Mutex::new(Some(tx)));
//! let app = Router::new().fallback(callback).layer(Extension(slot));
//! ```

mod callback;

pub use callback::{CODE_NOT_FOUND, CODE_RECEIVED, CodeSlot, callback};
