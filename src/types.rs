use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One fetched page of a browse collection.
///
/// `total` is the size of the whole collection as reported by the API with
/// this page, and is what the cursors check their boundaries against.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub elements: Vec<T>,
    pub total: u32,
    pub page_number: u32,
}

impl<T> Page<T> {
    /// Number of pages needed for `total` items at `page_size` items each.
    pub fn page_count(&self, page_size: u32) -> u32 {
        if page_size == 0 {
            return 0;
        }
        self.total.div_ceil(page_size)
    }
}

/// Page parameters handed to a fetch capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn offset(&self) -> u32 {
        (self.page - 1) * self.size
    }
}

/// The `{ "items": [...], "total": n }` object the browse endpoints nest
/// under an entity key such as `albums` or `playlists`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
    pub total: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtistRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Album {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Playlist {
    pub name: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Body of a successful token exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// `{ "error": { "status": 404, "message": "..." } }` as returned by the Web API.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub status: Option<u16>,
    pub message: String,
}

#[derive(Tabled)]
pub struct AlbumTableRow {
    pub name: String,
    pub artists: String,
    pub url: String,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub name: String,
    pub url: String,
}

#[derive(Tabled)]
pub struct CategoryTableRow {
    pub name: String,
}

impl From<&Album> for AlbumTableRow {
    fn from(album: &Album) -> Self {
        AlbumTableRow {
            name: album.name.clone(),
            artists: album
                .artists
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            url: album.external_urls.spotify.clone(),
        }
    }
}

impl From<&Playlist> for PlaylistTableRow {
    fn from(playlist: &Playlist) -> Self {
        PlaylistTableRow {
            name: playlist.name.clone(),
            url: playlist.external_urls.spotify.clone(),
        }
    }
}

impl From<&Category> for CategoryTableRow {
    fn from(category: &Category) -> Self {
        CategoryTableRow {
            name: category.name.clone(),
        }
    }
}
