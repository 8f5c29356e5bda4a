mod auth;
mod cursor;

pub use auth::AuthSession;
pub use cursor::{CategoryPlaylistsCursor, PageCursor};
