use crate::{
    Res,
    cli::Command,
    config::Settings,
    error::AdvisorError,
    management::{AuthSession, CategoryPlaylistsCursor, PageCursor},
    spotify::{
        CatalogClient,
        auth::{AuthOutcome, Authenticator},
        browse,
    },
    types::{Album, Category, Page, PageRequest, Playlist},
};

/// The collection `prev` and `next` currently apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Collection {
    NewReleases,
    Featured,
    Categories,
    CategoryPlaylists,
}

/// Result of one dispatched command, ready to be rendered.
#[derive(Debug, PartialEq)]
pub enum Reply {
    Albums(Page<Album>),
    Playlists(Page<Playlist>),
    Categories(Page<Category>),
    Authenticated,
    AuthFailed(AuthOutcome),
    /// A content command was issued before authenticating; nothing was fetched.
    Unauthorized,
    Unsupported(String),
    Failed(AdvisorError),
    Exit,
}

/// Dispatcher state for one console session.
///
/// Owns the authentication state and one cursor per browse collection. The
/// cursors live as long as the session; `first` on a cursor resets it.
pub struct Session {
    auth: AuthSession,
    authenticator: Authenticator,
    catalog: CatalogClient,
    page_size: u32,
    releases: PageCursor<Album>,
    featured: PageCursor<Playlist>,
    categories: PageCursor<Category>,
    category_playlists: CategoryPlaylistsCursor,
    last: Option<Collection>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        let page_size = settings.page_size;
        Session {
            auth: AuthSession::new(),
            catalog: CatalogClient::from_settings(&settings),
            authenticator: Authenticator::new(settings),
            page_size,
            releases: PageCursor::new(page_size),
            featured: PageCursor::new(page_size),
            categories: PageCursor::new(page_size),
            category_playlists: CategoryPlaylistsCursor::new(page_size),
            last: None,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    /// Runs one command to completion.
    ///
    /// Content commands are refused with [`Reply::Unauthorized`] until `auth`
    /// succeeds. Recoverable failures come back as [`Reply::Failed`]; only
    /// a redirect listener that cannot be started is returned as an error.
    pub async fn dispatch(&mut self, command: Command) -> Res<Reply> {
        match command {
            Command::Exit => Ok(Reply::Exit),
            Command::Unsupported(line) => Ok(Reply::Unsupported(line)),
            Command::Auth => match self.authenticator.authenticate(&mut self.auth).await? {
                AuthOutcome::Authenticated => Ok(Reply::Authenticated),
                outcome => Ok(Reply::AuthFailed(outcome)),
            },
            content => {
                let Some(token) = self.auth.access_token().map(str::to_string) else {
                    return Ok(Reply::Unauthorized);
                };
                Ok(self.browse(content, &token).await.unwrap_or_else(Reply::Failed))
            }
        }
    }

    async fn browse(&mut self, command: Command, token: &str) -> Result<Reply, AdvisorError> {
        let catalog = &self.catalog;

        match command {
            Command::New => {
                let page = self
                    .releases
                    .first(move |req| browse::new_releases(catalog, token, req))
                    .await?;
                self.last = Some(Collection::NewReleases);
                Ok(Reply::Albums(page))
            }
            Command::Featured => {
                let page = self
                    .featured
                    .first(move |req| browse::featured_playlists(catalog, token, req))
                    .await?;
                self.last = Some(Collection::Featured);
                Ok(Reply::Playlists(page))
            }
            Command::Categories => {
                let page = self
                    .categories
                    .first(move |req| browse::categories(catalog, token, req))
                    .await?;
                self.last = Some(Collection::Categories);
                Ok(Reply::Categories(page))
            }
            Command::Playlists(name) => {
                if name.is_empty() {
                    return Err(AdvisorError::CategoryNotSelected);
                }
                let category = browse::find_category(catalog, token, &name).await?;
                let page = self
                    .category_playlists
                    .first(category, move |category, req| {
                        browse::category_playlists(catalog, token, category, req)
                    })
                    .await?;
                self.last = Some(Collection::CategoryPlaylists);
                Ok(Reply::Playlists(page))
            }
            Command::Next => self.step(true, token).await,
            Command::Prev => self.step(false, token).await,
            other => Ok(Reply::Unsupported(format!("{:?}", other))),
        }
    }

    async fn step(&mut self, forward: bool, token: &str) -> Result<Reply, AdvisorError> {
        let catalog = &self.catalog;

        match self.last {
            None if forward => Err(AdvisorError::NoMorePages),
            None => Err(AdvisorError::NoPreviousPages),
            Some(Collection::NewReleases) => {
                let fetch = move |req: PageRequest| browse::new_releases(catalog, token, req);
                let page = if forward {
                    self.releases.next(fetch).await?
                } else {
                    self.releases.previous(fetch).await?
                };
                Ok(Reply::Albums(page))
            }
            Some(Collection::Featured) => {
                let fetch = move |req: PageRequest| browse::featured_playlists(catalog, token, req);
                let page = if forward {
                    self.featured.next(fetch).await?
                } else {
                    self.featured.previous(fetch).await?
                };
                Ok(Reply::Playlists(page))
            }
            Some(Collection::Categories) => {
                let fetch = move |req: PageRequest| browse::categories(catalog, token, req);
                let page = if forward {
                    self.categories.next(fetch).await?
                } else {
                    self.categories.previous(fetch).await?
                };
                Ok(Reply::Categories(page))
            }
            Some(Collection::CategoryPlaylists) => {
                let fetch = move |category: Category, req: PageRequest| {
                    browse::category_playlists(catalog, token, category, req)
                };
                let page = if forward {
                    self.category_playlists.next(fetch).await?
                } else {
                    self.category_playlists.previous(fetch).await?
                };
                Ok(Reply::Playlists(page))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path, query_param},
    };

    use super::*;

    fn settings(resource_server: &str) -> Settings {
        Settings {
            access_server: "http://127.0.0.1:9".to_string(),
            resource_server: resource_server.to_string(),
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "http://localhost:8080".to_string(),
            page_size: 2,
            country: "US".to_string(),
            locale: "en_US".to_string(),
            auth_timeout: Duration::from_millis(100),
            open_browser: false,
        }
    }

    fn authenticated(server: &MockServer) -> Session {
        let mut session = Session::new(settings(&server.uri()));
        session.auth.authorize("token".to_string());
        session
    }

    fn albums(names: &[&str], total: u32) -> serde_json::Value {
        let items: Vec<_> = names
            .iter()
            .map(|n| {
                json!({
                    "name": n,
                    "artists": [{ "name": "Artist" }],
                    "external_urls": { "spotify": format!("https://open.spotify.com/album/{}", n) }
                })
            })
            .collect();
        json!({ "albums": { "items": items, "total": total } })
    }

    async fn mount_release_page(server: &MockServer, offset: &str, names: &[&str], total: u32) {
        Mock::given(method("GET"))
            .and(path("/v1/browse/new-releases"))
            .and(query_param("offset", offset))
            .and(query_param("limit", "2"))
            .and(header("authorization", "Bearer token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(albums(names, total)))
            .mount(server)
            .await;
    }

    fn album_names(reply: &Reply) -> Vec<String> {
        match reply {
            Reply::Albums(page) => page.elements.iter().map(|a| a.name.clone()).collect(),
            other => panic!("expected albums, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_content_commands_require_authentication() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut session = Session::new(settings(&server.uri()));
        for command in [
            Command::Categories,
            Command::New,
            Command::Featured,
            Command::Playlists("Mood".to_string()),
            Command::Next,
            Command::Prev,
        ] {
            let reply = session.dispatch(command).await.unwrap();
            assert_eq!(reply, Reply::Unauthorized);
        }
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_unsupported_and_exit_need_no_authentication() {
        let server = MockServer::start().await;
        let mut session = Session::new(settings(&server.uri()));

        assert_eq!(
            session.dispatch(Command::from("dance")).await.unwrap(),
            Reply::Unsupported("dance".to_string())
        );
        assert_eq!(session.dispatch(Command::Exit).await.unwrap(), Reply::Exit);
    }

    #[tokio::test]
    async fn test_navigation_without_collection() {
        let server = MockServer::start().await;
        let mut session = authenticated(&server);

        assert_eq!(
            session.dispatch(Command::Next).await.unwrap(),
            Reply::Failed(AdvisorError::NoMorePages)
        );
        assert_eq!(
            session.dispatch(Command::Prev).await.unwrap(),
            Reply::Failed(AdvisorError::NoPreviousPages)
        );
    }

    #[tokio::test]
    async fn test_new_releases_paging() {
        let server = MockServer::start().await;
        mount_release_page(&server, "0", &["a", "b"], 3).await;
        mount_release_page(&server, "2", &["c"], 3).await;

        let mut session = authenticated(&server);

        let reply = session.dispatch(Command::New).await.unwrap();
        assert_eq!(album_names(&reply), vec!["a", "b"]);

        let reply = session.dispatch(Command::Next).await.unwrap();
        assert_eq!(album_names(&reply), vec!["c"]);

        assert_eq!(
            session.dispatch(Command::Next).await.unwrap(),
            Reply::Failed(AdvisorError::NoMorePages)
        );

        let reply = session.dispatch(Command::Prev).await.unwrap();
        assert_eq!(album_names(&reply), vec!["a", "b"]);

        assert_eq!(
            session.dispatch(Command::Prev).await.unwrap(),
            Reply::Failed(AdvisorError::NoPreviousPages)
        );
    }

    #[tokio::test]
    async fn test_category_playlists_by_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/browse/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "categories": {
                    "items": [
                        { "id": "toplists", "name": "Top Lists" },
                        { "id": "mood", "name": "Mood" }
                    ],
                    "total": 2
                }
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/browse/categories/mood/playlists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "playlists": {
                    "items": [
                        {
                            "name": "Chill",
                            "external_urls": { "spotify": "https://open.spotify.com/playlist/1" }
                        }
                    ],
                    "total": 1
                }
            })))
            .mount(&server)
            .await;

        let mut session = authenticated(&server);

        match session.dispatch(Command::from("playlists mood")).await.unwrap() {
            Reply::Playlists(page) => {
                assert_eq!(page.total, 1);
                assert_eq!(page.elements[0].name, "Chill");
            }
            other => panic!("expected playlists, got {:?}", other),
        }
        assert_eq!(
            session.category_playlists.selected_category().map(|c| c.id.as_str()),
            Some("mood")
        );

        assert_eq!(
            session.dispatch(Command::Next).await.unwrap(),
            Reply::Failed(AdvisorError::NoMorePages)
        );
    }

    #[tokio::test]
    async fn test_unknown_category() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/browse/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "categories": { "items": [{ "id": "mood", "name": "Mood" }], "total": 1 }
            })))
            .mount(&server)
            .await;

        let mut session = authenticated(&server);

        assert_eq!(
            session.dispatch(Command::from("playlists Polka")).await.unwrap(),
            Reply::Failed(AdvisorError::UnknownCategory("Polka".to_string()))
        );
        assert_eq!(
            session.dispatch(Command::from("playlists")).await.unwrap(),
            Reply::Failed(AdvisorError::CategoryNotSelected)
        );
    }

    #[tokio::test]
    async fn test_api_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/browse/featured-playlists"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": { "status": 404, "message": "Service not found" }
            })))
            .mount(&server)
            .await;

        let mut session = authenticated(&server);

        assert_eq!(
            session.dispatch(Command::Featured).await.unwrap(),
            Reply::Failed(AdvisorError::Api {
                status: 404,
                message: "Service not found".to_string()
            })
        );
        // a failed first page leaves nothing to navigate
        assert_eq!(
            session.dispatch(Command::Next).await.unwrap(),
            Reply::Failed(AdvisorError::NoMorePages)
        );
    }
}
