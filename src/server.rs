//! The authorization code listener.
//!
//! Binds the port named by the redirect URI, serves the browser redirect with
//! [`api::callback`] on spawned tasks and lets the caller wait, up to a
//! timeout, for the one request that carries a code. The servers are always
//! stopped before [`CodeListener::wait`] returns, so the port is free for the
//! next attempt.

use std::{
    net::{Ipv4Addr, Ipv6Addr, SocketAddr},
    sync::Arc,
    time::Duration,
};

use axum::{Extension, Router};
use tokio::{
    net::TcpListener,
    sync::{Mutex, oneshot, watch},
    task::JoinHandle,
    time::Instant,
};

use crate::{
    Res,
    api::{self, CodeSlot},
    utils, warning,
};

/// How long stopped servers get to finish open connections before they are
/// aborted.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

/// A bound redirect listener waiting for at most one authorization code.
///
/// Dropping a listener that was never waited on aborts its servers.
pub struct CodeListener {
    port: u16,
    code_rx: Option<oneshot::Receiver<String>>,
    shutdown_tx: watch::Sender<bool>,
    servers: Vec<JoinHandle<()>>,
}

impl CodeListener {
    /// Binds the loopback addresses on the port of `redirect_uri` and starts
    /// serving.
    ///
    /// The redirect URI usually names `localhost`, which a browser may resolve
    /// to either `127.0.0.1` or `::1`, so both are bound. `127.0.0.1` is
    /// required; `::1` is skipped silently on hosts without IPv6 loopback.
    ///
    /// # Arguments
    ///
    /// * `redirect_uri` - The redirect URI registered for the application,
    ///   e.g. `http://localhost:8080`
    ///
    /// # Errors
    ///
    /// Fails when the redirect URI has no usable port or `127.0.0.1` cannot be
    /// bound on it. Both are escalated by the caller, the client cannot
    /// authenticate without the listener.
    pub async fn bind(redirect_uri: &str) -> Res<Self> {
        let port = utils::redirect_port(redirect_uri)?;

        let v4 = TcpListener::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, port))).await?;
        let mut listeners = vec![v4];
        if let Ok(v6) = TcpListener::bind(SocketAddr::from((Ipv6Addr::LOCALHOST, port))).await {
            listeners.push(v6);
        }

        let (code_tx, code_rx) = oneshot::channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let slot: CodeSlot = Arc::new(Mutex::new(Some(code_tx)));

        let app = Router::new()
            .fallback(api::callback)
            .layer(Extension(slot));

        let servers = listeners
            .into_iter()
            .map(|listener| {
                let app = app.clone();
                let mut shutdown_rx = shutdown_rx.clone();
                tokio::spawn(async move {
                    let served = axum::serve(listener, app).with_graceful_shutdown(async move {
                        let _ = shutdown_rx.wait_for(|stop| *stop).await;
                    });
                    if let Err(e) = served.await {
                        warning!("Redirect listener stopped with an error: {}", e);
                    }
                })
            })
            .collect();

        Ok(CodeListener {
            port,
            code_rx: Some(code_rx),
            shutdown_tx,
            servers,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Waits for the authorization code until `timeout` elapses.
    ///
    /// Returns `None` on timeout. Requests without a code do not end the
    /// wait. Either way the servers are stopped before this returns: open
    /// connections get [`SHUTDOWN_GRACE`] to finish, then the servers are
    /// aborted, so a half-sent request cannot hold the port.
    pub async fn wait(mut self, timeout: Duration) -> Option<String> {
        let code = match self.code_rx.take() {
            Some(rx) => match tokio::time::timeout(timeout, rx).await {
                Ok(Ok(code)) => Some(code),
                Ok(Err(_)) | Err(_) => None,
            },
            None => None,
        };

        self.shutdown_tx.send_replace(true);
        let deadline = Instant::now() + SHUTDOWN_GRACE;
        for mut server in self.servers.drain(..) {
            if tokio::time::timeout_at(deadline, &mut server).await.is_err() {
                server.abort();
                let _ = server.await;
            }
        }
        code
    }
}

impl Drop for CodeListener {
    fn drop(&mut self) {
        self.shutdown_tx.send_replace(true);
        for server in &self.servers {
            server.abort();
        }
    }
}
