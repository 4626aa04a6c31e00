//! Paginated entity list state: fetch one page, windowed page numbers,
//! search on explicit submit only.

use async_trait::async_trait;

use crate::{error::ClientError, modal::ActiveModal};

const PAGE_WINDOW_RADIUS: u32 = 2;

/// One fetched page of an entity collection.
#[derive(Debug, Clone)]
pub struct PageOf<T> {
    pub max_pages: u32,
    pub items: Vec<T>,
}

/// Per-entity page fetching and deletion, implemented by the pagers on
/// `AdminClient`.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Send;
    type Id: Copy + Eq + Send;

    async fn fetch_page(
        &self,
        page: u32,
        search: Option<&str>,
    ) -> Result<PageOf<Self::Item>, ClientError>;

    async fn delete(&self, id: Self::Id) -> Result<(), ClientError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

/// Windowed pagination: current page ± radius, first and last pages
/// pinned, ellipses for skipped ranges.
#[derive(Debug, Clone, Copy)]
pub struct PageWindow {
    pub current: u32,
    pub max: u32,
    pub radius: u32,
}

impl PageWindow {
    pub fn items(&self) -> Vec<PageItem> {
        let mut items = Vec::new();
        if self.max == 0 {
            return items;
        }
        let start = self.current.saturating_sub(self.radius).max(1);
        let end = (self.current + self.radius).min(self.max);
        if start != 1 {
            items.push(PageItem::Page(1));
            if start > 2 {
                items.push(PageItem::Ellipsis);
            }
        }
        for page in start..=end {
            items.push(PageItem::Page(page));
        }
        if end < self.max {
            if end < self.max - 1 {
                items.push(PageItem::Ellipsis);
            }
            items.push(PageItem::Page(self.max));
        }
        items
    }
}

/// Owns one list view's transient state: fetched rows, pagination, the
/// submitted search term and whichever modal is open. The pending search
/// input never changes an issued request until `submit_search`.
pub struct ListController<S: PageSource> {
    source: S,
    page: u32,
    max_pages: u32,
    search_input: String,
    search_term: Option<String>,
    items: Vec<S::Item>,
    pub modal: ActiveModal<S::Id>,
}

impl<S: PageSource> ListController<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            page: 1,
            max_pages: 0,
            search_input: String::new(),
            search_term: None,
            items: Vec::new(),
            modal: ActiveModal::default(),
        }
    }

    pub fn items(&self) -> &[S::Item] {
        &self.items
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Records keystrokes only; no request is issued.
    pub fn set_search_input(&mut self, input: impl Into<String>) {
        self.search_input = input.into();
    }

    /// Applies the pending input as the search term and refetches from
    /// page 1. An empty input clears the term.
    pub async fn submit_search(&mut self) -> Result<(), ClientError> {
        let trimmed = self.search_input.trim();
        self.search_term = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self.page = 1;
        self.refetch().await
    }

    /// Replaces the displayed collection and total-page count.
    pub async fn refetch(&mut self) -> Result<(), ClientError> {
        let fetched = self
            .source
            .fetch_page(self.page, self.search_term.as_deref())
            .await?;
        self.max_pages = fetched.max_pages;
        self.items = fetched.items;
        Ok(())
    }

    pub async fn goto(&mut self, page: u32) -> Result<(), ClientError> {
        self.page = if self.max_pages == 0 {
            page.max(1)
        } else {
            page.clamp(1, self.max_pages)
        };
        self.refetch().await
    }

    /// Deletes the entity, then refetches the current page so the rows
    /// reflect server reality even when the delete failed. The modal is
    /// closed either way.
    pub async fn delete_entity(&mut self, id: S::Id) -> Result<(), ClientError> {
        self.modal.close();
        let deleted = self.source.delete(id).await;
        let refetched = self.refetch().await;
        deleted.and(refetched)
    }

    pub fn window(&self) -> PageWindow {
        PageWindow {
            current: self.page,
            max: self.max_pages,
            radius: PAGE_WINDOW_RADIUS,
        }
    }
}

#[cfg(test)]
#[path = "tests/list_tests.rs"]
mod tests;
