use std::{future::Future, marker::PhantomData};

use crate::{
    error::AdvisorError,
    types::{Category, Page, PageRequest, Playlist},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Position {
    page: u32,
    total: u32,
}

/// Forward and backward navigation over one offset-paginated collection.
///
/// The cursor never fetches on its own. Every move takes a fetch capability
/// that turns a [`PageRequest`] into a [`Page`], so the same cursor serves
/// new releases, featured playlists and categories alike, and tests can feed
/// it from memory.
///
/// A fresh cursor has no position. After the first successful fetch it holds
/// both the current page (always `>= 1`) and the total reported with that
/// page. A failed fetch leaves the position untouched.
#[derive(Debug)]
pub struct PageCursor<T> {
    page_size: u32,
    position: Option<Position>,
    _items: PhantomData<fn() -> T>,
}

impl<T> PageCursor<T> {
    /// Creates a cursor without a position.
    ///
    /// # Arguments
    ///
    /// * `page_size` - Number of items requested per page, must be at least 1
    ///
    /// # Example
    ///
    /// ```
    /// use std::future::ready;
    ///
    /// use musicadvisor::{management::PageCursor, types::Page};
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let mut cursor = PageCursor::new(2);
    /// assert_eq!(cursor.current_page(), None);
    ///
    /// let page = cursor
    ///     .first(|req| {
    ///         ready(Ok(Page {
    ///             elements: vec!["a", "b"],
    ///             total: 3,
    ///             page_number: req.page,
    ///         }))
    ///     })
    ///     .await
    ///     .unwrap();
    /// assert_eq!(page.elements, vec!["a", "b"]);
    /// assert!(cursor.has_next());
    /// # }
    /// ```
    pub fn new(page_size: u32) -> Self {
        PageCursor {
            page_size,
            position: None,
            _items: PhantomData,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn current_page(&self) -> Option<u32> {
        self.position.map(|p| p.page)
    }

    pub fn known_total(&self) -> Option<u32> {
        self.position.map(|p| p.total)
    }

    /// Whether `next` would be attempted.
    ///
    /// Compares the current page, not the one after it, against the total:
    /// forward movement stops once `current_page * page_size >= total`.
    pub fn has_next(&self) -> bool {
        match self.position {
            Some(pos) => (pos.page as u64) * (self.page_size as u64) < pos.total as u64,
            None => false,
        }
    }

    pub fn has_previous(&self) -> bool {
        matches!(self.position, Some(pos) if pos.page > 1)
    }

    /// Fetches page 1 and resets the cursor to it.
    pub async fn first<F, Fut>(&mut self, fetch: F) -> Result<Page<T>, AdvisorError>
    where
        F: FnOnce(PageRequest) -> Fut,
        Fut: Future<Output = Result<Page<T>, AdvisorError>>,
    {
        self.move_to(1, fetch).await
    }

    /// Fetches the page after the current one.
    ///
    /// Fails with [`AdvisorError::NoMorePages`] before any page was fetched
    /// or when the current page already reaches the known total.
    pub async fn next<F, Fut>(&mut self, fetch: F) -> Result<Page<T>, AdvisorError>
    where
        F: FnOnce(PageRequest) -> Fut,
        Fut: Future<Output = Result<Page<T>, AdvisorError>>,
    {
        let Some(pos) = self.position.filter(|_| self.has_next()) else {
            return Err(AdvisorError::NoMorePages);
        };
        self.move_to(pos.page + 1, fetch).await
    }

    /// Fetches the page before the current one.
    ///
    /// Fails with [`AdvisorError::NoPreviousPages`] on page 1 or before any
    /// page was fetched.
    pub async fn previous<F, Fut>(&mut self, fetch: F) -> Result<Page<T>, AdvisorError>
    where
        F: FnOnce(PageRequest) -> Fut,
        Fut: Future<Output = Result<Page<T>, AdvisorError>>,
    {
        let Some(pos) = self.position.filter(|p| p.page > 1) else {
            return Err(AdvisorError::NoPreviousPages);
        };
        self.move_to(pos.page - 1, fetch).await
    }

    async fn move_to<F, Fut>(&mut self, page: u32, fetch: F) -> Result<Page<T>, AdvisorError>
    where
        F: FnOnce(PageRequest) -> Fut,
        Fut: Future<Output = Result<Page<T>, AdvisorError>>,
    {
        let fetched = fetch(PageRequest {
            page,
            size: self.page_size,
        })
        .await?;

        // the total may change between calls, always trust the latest one
        self.position = Some(Position {
            page,
            total: fetched.total,
        });
        Ok(fetched)
    }
}

/// Page cursor over the playlists of one category.
///
/// `next` and `previous` need a category bound by an earlier successful
/// `first`; without one they fail with [`AdvisorError::CategoryNotSelected`]
/// rather than a page boundary error.
#[derive(Debug)]
pub struct CategoryPlaylistsCursor {
    pages: PageCursor<Playlist>,
    selected: Option<Category>,
}

impl CategoryPlaylistsCursor {
    /// Creates a cursor with no category bound.
    pub fn new(page_size: u32) -> Self {
        CategoryPlaylistsCursor {
            pages: PageCursor::new(page_size),
            selected: None,
        }
    }

    pub fn selected_category(&self) -> Option<&Category> {
        self.selected.as_ref()
    }

    pub fn pages(&self) -> &PageCursor<Playlist> {
        &self.pages
    }

    /// Binds `category` and fetches the first page of its playlists.
    ///
    /// The binding only changes when the fetch succeeds.
    pub async fn first<F, Fut>(
        &mut self,
        category: Category,
        fetch: F,
    ) -> Result<Page<Playlist>, AdvisorError>
    where
        F: FnOnce(Category, PageRequest) -> Fut,
        Fut: Future<Output = Result<Page<Playlist>, AdvisorError>>,
    {
        let bound = category.clone();
        let page = self.pages.first(|req| fetch(category, req)).await?;
        self.selected = Some(bound);
        Ok(page)
    }

    /// Fetches the next page of the bound category's playlists.
    ///
    /// # Errors
    ///
    /// * [`AdvisorError::CategoryNotSelected`] - no `first` has succeeded yet
    /// * [`AdvisorError::NoMorePages`] - the current page already reaches the total
    /// * any error returned by `fetch`, which leaves the cursor unchanged
    pub async fn next<F, Fut>(&mut self, fetch: F) -> Result<Page<Playlist>, AdvisorError>
    where
        F: FnOnce(Category, PageRequest) -> Fut,
        Fut: Future<Output = Result<Page<Playlist>, AdvisorError>>,
    {
        let category = self.bound_category()?;
        self.pages.next(|req| fetch(category, req)).await
    }

    /// Fetches the previous page of the bound category's playlists.
    ///
    /// Fails with [`AdvisorError::CategoryNotSelected`] before a category is
    /// bound and with [`AdvisorError::NoPreviousPages`] on page 1.
    pub async fn previous<F, Fut>(&mut self, fetch: F) -> Result<Page<Playlist>, AdvisorError>
    where
        F: FnOnce(Category, PageRequest) -> Fut,
        Fut: Future<Output = Result<Page<Playlist>, AdvisorError>>,
    {
        let category = self.bound_category()?;
        self.pages.previous(|req| fetch(category, req)).await
    }

    fn bound_category(&self) -> Result<Category, AdvisorError> {
        self.selected
            .clone()
            .ok_or(AdvisorError::CategoryNotSelected)
    }
}
