use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query};
use tokio::sync::{Mutex, oneshot};

pub const CODE_RECEIVED: &str = "Got the code. Return back to your program.";
pub const CODE_NOT_FOUND: &str = "Not found authorization code. Try again.";

/// Single-use slot the handler publishes the authorization code through.
///
/// Holds the sending half of a oneshot channel until the first request that
/// carries a code takes it. Later hits find the slot empty.
pub type CodeSlot = Arc<Mutex<Option<oneshot::Sender<String>>>>;

/// Handles every request that reaches the redirect listener, whatever its path.
///
/// A non-empty `code` query parameter (already URL-decoded by the extractor)
/// is handed to the waiting caller. Requests without one are answered with a
/// not-found message and leave the listener running.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(slot): Extension<CodeSlot>,
) -> &'static str {
    let Some(code) = params.get("code").filter(|c| !c.is_empty()) else {
        return CODE_NOT_FOUND;
    };

    if let Some(tx) = slot.lock().await.take() {
        // the waiter may have timed out already, nothing left to do then
        let _ = tx.send(code.clone());
    }
    CODE_RECEIVED
}
