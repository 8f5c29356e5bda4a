use std::time::Duration;

use chrono::{Local, TimeDelta};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client, StatusCode, header::AUTHORIZATION};

use crate::{
    Res,
    config::Settings,
    error::AdvisorError,
    info,
    management::AuthSession,
    server::CodeListener,
    spotify::api_error,
    success,
    types::TokenResponse,
    utils, warning,
};

/// How a single [`Authenticator::authenticate`] call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// A token was obtained and stored in the session.
    Authenticated,
    /// No request carrying a code reached the listener before the timeout.
    CodeNotReceived,
    /// A code arrived but the accounts service did not hand out a token.
    TokenNotReceived(AdvisorError),
}

/// Runs the authorization code flow against the Spotify accounts service.
///
/// 1. Bind the redirect listener on the port of the configured redirect URI
/// 2. Print (and optionally open) the authorization URL
/// 3. Wait, bounded by the configured timeout, for the browser redirect
/// 4. Exchange the code for a bearer token
/// 5. Store the token in the [`AuthSession`]
///
/// Steps never overlap and nothing is retried. A failed attempt leaves the
/// session exactly as it was, and the flow can be started again right away.
pub struct Authenticator {
    settings: Settings,
}

impl Authenticator {
    pub fn new(settings: Settings) -> Self {
        Authenticator { settings }
    }

    /// Authenticates `session`.
    ///
    /// # Errors
    ///
    /// Only an unusable redirect URI or a port that cannot be bound are
    /// returned as errors. Every other failure is reported through the
    /// returned [`AuthOutcome`].
    pub async fn authenticate(&self, session: &mut AuthSession) -> Res<AuthOutcome> {
        let Some(code) = self.fetch_code().await? else {
            warning!("Authorization code not received.");
            return Ok(AuthOutcome::CodeNotReceived);
        };
        success!("Code received.");

        info!("Making http request for access_token...");
        match exchange_code(
            &self.settings.token_endpoint(),
            &code,
            &self.settings.redirect_uri,
            &self.settings.client_id,
            &self.settings.client_secret,
        )
        .await
        {
            Ok(token) => {
                session.authorize(token);
                success!("Authentication successful!");
                Ok(AuthOutcome::Authenticated)
            }
            Err(e) => {
                warning!("Access token not received. {}", e);
                Ok(AuthOutcome::TokenNotReceived(e))
            }
        }
    }

    async fn fetch_code(&self) -> Res<Option<String>> {
        let listener = CodeListener::bind(&self.settings.redirect_uri).await?;

        let auth_url = utils::authorization_url(
            &self.settings.authorize_endpoint(),
            &self.settings.client_id,
            &self.settings.redirect_uri,
        );
        info!("Use this link to request the access code:\n{}", auth_url);

        if self.settings.open_browser && webbrowser::open(&auth_url).is_err() {
            warning!("Failed to open browser. Please navigate to the link above manually.");
        }

        let pb = waiting_spinner(listener.port(), self.settings.auth_timeout);
        let code = listener.wait(self.settings.auth_timeout).await;
        pb.finish_and_clear();

        Ok(code)
    }
}

fn waiting_spinner(port: u16, timeout: Duration) -> ProgressBar {
    let deadline = TimeDelta::from_std(timeout)
        .ok()
        .and_then(|d| Local::now().checked_add_signed(d));

    let pb = ProgressBar::new_spinner();
    match deadline {
        Some(deadline) => pb.set_message(format!(
            "Waiting for the code on port {} until {}...",
            port,
            deadline.format("%H:%M:%S")
        )),
        None => pb.set_message(format!("Waiting for the code on port {}...", port)),
    }
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Trades an authorization code for a bearer token.
///
/// Posts `grant_type=authorization_code`, the code and the redirect URI as a
/// form, authenticated with the client credentials as HTTP Basic. Anything
/// but `200 OK` is returned as [`AdvisorError::Api`] carrying the status and
/// the response body.
pub async fn exchange_code(
    token_endpoint: &str,
    code: &str,
    redirect_uri: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<String, AdvisorError> {
    let client = Client::new();
    let res = client
        .post(token_endpoint)
        .header(AUTHORIZATION, utils::basic_credentials(client_id, client_secret))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ])
        .send()
        .await?;

    let status = res.status();
    let body = res.text().await?;
    if status != StatusCode::OK {
        return Err(api_error(status.as_u16(), &body));
    }

    let token: TokenResponse = serde_json::from_str(&body)?;
    Ok(token.access_token)
}
