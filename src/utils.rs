use base64::{Engine, engine::general_purpose::STANDARD};
use url::Url;

use crate::error::AdvisorError;

/// Builds the URL the user opens to grant access.
///
/// `{auth_endpoint}?client_id={id}&redirect_uri={redirect_uri}&response_type=code`
pub fn authorization_url(auth_endpoint: &str, client_id: &str, redirect_uri: &str) -> String {
    format!(
        "{auth_endpoint}?client_id={client_id}&redirect_uri={redirect_uri}&response_type=code",
        auth_endpoint = auth_endpoint,
        client_id = client_id,
        redirect_uri = redirect_uri
    )
}

/// Port the local listener binds for a redirect URI.
///
/// Falls back to the scheme's default port when the URI names none.
pub fn redirect_port(redirect_uri: &str) -> Result<u16, AdvisorError> {
    let url = Url::parse(redirect_uri)
        .map_err(|e| AdvisorError::InvalidRedirectUri(format!("{}: {}", redirect_uri, e)))?;

    url.port_or_known_default()
        .ok_or_else(|| AdvisorError::InvalidRedirectUri(redirect_uri.to_string()))
}

/// Value of the `Authorization` header for client credentials:
/// `Basic base64(client_id:client_secret)`.
pub fn basic_credentials(client_id: &str, client_secret: &str) -> String {
    let encoded = STANDARD.encode(format!("{}:{}", client_id, client_secret));
    format!("Basic {}", encoded)
}
