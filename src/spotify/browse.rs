//! Typed fetchers for the browse endpoints.
//!
//! Each fetcher matches the capability shape the page cursors expect, so a
//! call site only has to close over the client and the access token.

use crate::{
    error::AdvisorError,
    spotify::CatalogClient,
    types::{Album, Category, Page, PageRequest, Playlist},
};

/// Fetches one page of new album releases.
///
/// # Arguments
///
/// * `client` - Catalog client pointing at the resource server
/// * `token` - Bearer access token from a completed authentication
/// * `req` - Page number and size to request
///
/// # Errors
///
/// Returns [`AdvisorError::Api`] when the resource server answers with an
/// error envelope and [`AdvisorError::Transport`] when it cannot be reached
/// or the body does not carry an `albums` paging object.
///
/// # Example
///
/// ```no_run
/// use musicadvisor::{
///     management::PageCursor,
///     spotify::{CatalogClient, browse},
/// };
///
/// # async fn run(token: &str) -> Result<(), musicadvisor::error::AdvisorError> {
/// let client = CatalogClient::new("https://api.spotify.com", "US", "en_US");
/// let mut releases = PageCursor::new(5);
/// let page = releases
///     .first(|req| browse::new_releases(&client, token, req))
///     .await?;
/// println!("{} of {} albums", page.elements.len(), page.total);
/// # Ok(())
/// # }
/// ```
pub async fn new_releases(
    client: &CatalogClient,
    token: &str,
    req: PageRequest,
) -> Result<Page<Album>, AdvisorError> {
    client
        .fetch_page("/v1/browse/new-releases", "albums", Some(req), token)
        .await
}

/// Fetches one page of featured playlists.
///
/// Errors are classified the same way as for [`new_releases`].
pub async fn featured_playlists(
    client: &CatalogClient,
    token: &str,
    req: PageRequest,
) -> Result<Page<Playlist>, AdvisorError> {
    client
        .fetch_page("/v1/browse/featured-playlists", "playlists", Some(req), token)
        .await
}

/// Fetches one page of browse categories.
pub async fn categories(
    client: &CatalogClient,
    token: &str,
    req: PageRequest,
) -> Result<Page<Category>, AdvisorError> {
    client
        .fetch_page("/v1/browse/categories", "categories", Some(req), token)
        .await
}

/// Fetches one page of the playlists filed under `category`.
///
/// # Arguments
///
/// * `client` - Catalog client pointing at the resource server
/// * `token` - Bearer access token
/// * `category` - Category whose `id` goes into the request path
/// * `req` - Page number and size to request
///
/// # Errors
///
/// An unknown category id comes back from the resource server as
/// [`AdvisorError::Api`] (usually a 404), other failures as for
/// [`new_releases`].
pub async fn category_playlists(
    client: &CatalogClient,
    token: &str,
    category: Category,
    req: PageRequest,
) -> Result<Page<Playlist>, AdvisorError> {
    let path = format!("/v1/browse/categories/{}/playlists", category.id);
    client.fetch_page(&path, "playlists", Some(req), token).await
}

/// Resolves a category by its display name, ignoring ASCII case.
///
/// Uses the unpaged categories listing.
pub async fn find_category(
    client: &CatalogClient,
    token: &str,
    name: &str,
) -> Result<Category, AdvisorError> {
    let all: Page<Category> = client
        .fetch_page("/v1/browse/categories", "categories", None, token)
        .await?;

    all.elements
        .into_iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| AdvisorError::UnknownCategory(name.to_string()))
}
