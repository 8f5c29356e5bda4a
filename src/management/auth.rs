/// The client's standing with the accounts service.
///
/// Authenticated exactly when a bearer token is held. A token is only ever
/// stored by a successful authentication, and there is no logout, so a
/// session never goes back to unauthenticated within a process.
#[derive(Debug, Default, Clone)]
pub struct AuthSession {
    access_token: Option<String>,
}

impl AuthSession {
    pub fn new() -> Self {
        AuthSession { access_token: None }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub(crate) fn authorize(&mut self, token: String) {
        self.access_token = Some(token);
    }
}
