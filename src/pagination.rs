//! Offset and cursor pagination.
//!
//! Zendesk list endpoints support two independent strategies:
//!
//! | Strategy | Request                              | Response metadata               |
//! |----------|--------------------------------------|---------------------------------|
//! | Offset   | `page`, `per_page`                   | `next_page`, `previous_page`, `count` (top level) |
//! | Cursor   | `page[size]`, `page[after]`/`page[before]` | `meta.has_more`, `meta.after_cursor`, `meta.before_cursor` |
//!
//! A single call uses exactly one of them, so the request and response
//! types are kept apart. [`PaginationOptions`] picks a strategy for
//! [`PageIterator`], which walks every page of a listing lazily.
//!
//! Cursors are opaque. They are only ever copied from one response into
//! the next request.

use std::collections::VecDeque;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::envelope;
use crate::error::ZendeskError;
use crate::models::common::{is_false, null_as_empty_string, null_as_false, null_as_zero};
use crate::query::{self, push_num, push_str, QueryParams};

/// Page size used by [`PaginationOptions::default`].
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Offset pagination request parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageOptions {
    /// 1-based page number. 0 lets the server pick the first page.
    pub page: u32,
    /// Results per page. 0 uses the server default.
    pub per_page: u32,
}

impl PageOptions {
    /// Creates options for the given page.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }
}

impl QueryParams for PageOptions {
    fn append_pairs(&self, pairs: &mut Vec<(&'static str, String)>) {
        push_num(pairs, "page", self.page);
        push_num(pairs, "per_page", self.per_page);
    }
}

/// Offset pagination info returned alongside a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// URL of the previous page, if any.
    #[serde(default)]
    pub previous_page: Option<String>,

    /// URL of the next page, if any.
    #[serde(default)]
    pub next_page: Option<String>,

    /// Total number of records across all pages.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub count: i64,
}

impl Page {
    /// Returns true if a next page exists.
    pub fn has_next(&self) -> bool {
        self.next_page.is_some()
    }

    /// Returns true if a previous page exists.
    pub fn has_prev(&self) -> bool {
        self.previous_page.is_some()
    }
}

/// Cursor pagination request parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorPagination {
    /// Results per page. Most endpoints allow up to 100.
    pub page_size: u32,

    /// Cursor of the next result set.
    pub page_after: String,

    /// Cursor of the previous result set.
    pub page_before: String,
}

impl QueryParams for CursorPagination {
    fn append_pairs(&self, pairs: &mut Vec<(&'static str, String)>) {
        push_num(pairs, "page[size]", self.page_size);
        push_str(pairs, "page[after]", &self.page_after);
        push_str(pairs, "page[before]", &self.page_before);
    }
}

/// Cursor pagination info returned alongside a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorPaginationMeta {
    /// True if more results exist after this page.
    #[serde(
        default,
        deserialize_with = "null_as_false",
        skip_serializing_if = "is_false"
    )]
    pub has_more: bool,

    /// Cursor of the next result set.
    #[serde(
        default,
        deserialize_with = "null_as_empty_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub after_cursor: String,

    /// Cursor of the previous result set.
    #[serde(
        default,
        deserialize_with = "null_as_empty_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub before_cursor: String,
}

/// Sorting and side-loading parameters shared by list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonOptions {
    /// Cursor-style sort, e.g. `-updated_at`.
    pub sort: String,
    /// Offset-style sort field.
    pub sort_by: String,
    /// `asc` or `desc`, used with `sort_by`.
    pub sort_order: String,
    /// Comma-separated side-loads.
    pub include: String,
}

impl QueryParams for CommonOptions {
    fn append_pairs(&self, pairs: &mut Vec<(&'static str, String)>) {
        push_str(pairs, "sort", &self.sort);
        push_str(pairs, "sort_by", &self.sort_by);
        push_str(pairs, "sort_order", &self.sort_order);
        push_str(pairs, "include", &self.include);
    }
}

/// Offset pagination plus common list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffsetOptions {
    /// Page selection.
    pub page: PageOptions,
    /// Sorting and side-loads.
    pub common: CommonOptions,
}

impl QueryParams for OffsetOptions {
    fn append_pairs(&self, pairs: &mut Vec<(&'static str, String)>) {
        self.page.append_pairs(pairs);
        self.common.append_pairs(pairs);
    }
}

/// Cursor pagination plus common list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorOptions {
    /// Cursor selection.
    pub cursor: CursorPagination,
    /// Sorting and side-loads.
    pub common: CommonOptions,
}

impl QueryParams for CursorOptions {
    fn append_pairs(&self, pairs: &mut Vec<(&'static str, String)>) {
        self.cursor.append_pairs(pairs);
        self.common.append_pairs(pairs);
    }
}

/// Which pagination strategy an iterator uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Page numbers.
    Offset,
    /// Opaque cursors. Preferred by Zendesk wherever supported.
    #[default]
    Cursor,
}

/// Options for walking a whole listing with a [`PageIterator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationOptions {
    /// Results per request.
    pub page_size: u32,
    /// Strategy used to advance between pages.
    pub strategy: Strategy,
    /// Sorting and side-loads sent with every request.
    pub common: CommonOptions,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            strategy: Strategy::Cursor,
            common: CommonOptions::default(),
        }
    }
}

impl PaginationOptions {
    /// Cursor pagination with the default page size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches to offset pagination.
    pub fn offset(mut self) -> Self {
        self.strategy = Strategy::Offset;
        self
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the common list filters.
    pub fn with_common(mut self, common: CommonOptions) -> Self {
        self.common = common;
        self
    }
}

impl Client {
    /// Lists `path` with offset pagination, decoding items under `key`.
    pub(crate) async fn list_offset<T: DeserializeOwned>(
        &self,
        path: &str,
        key: &str,
        opts: &impl QueryParams,
    ) -> Result<(Vec<T>, Page), ZendeskError> {
        let url = query::add_options(path, opts)?;
        let body = self.get(&url).await?;
        envelope::unwrap_offset_page(key, &body)
    }

    /// Lists `path` with cursor pagination, decoding items under `key`.
    pub(crate) async fn list_cursor<T: DeserializeOwned>(
        &self,
        path: &str,
        key: &str,
        opts: &impl QueryParams,
    ) -> Result<(Vec<T>, CursorPaginationMeta), ZendeskError> {
        let url = query::add_options(path, opts)?;
        let body = self.get(&url).await?;
        envelope::unwrap_cursor_page(key, &body)
    }
}

/// Lazily fetches every page of a listing.
///
/// Each call to [`next_page`](Self::next_page) issues at most one request,
/// advancing by page number or by the previous response's `after_cursor`.
/// The iterator stops after the server reports no further pages, or after
/// the first failed request; it never starts over.
pub struct PageIterator<'c, T> {
    client: &'c Client,
    path: String,
    key: &'static str,
    options: PaginationOptions,
    page_index: u32,
    page_after: String,
    has_more: bool,
    buffer: VecDeque<T>,
}

impl<'c, T: DeserializeOwned> PageIterator<'c, T> {
    pub(crate) fn new(
        client: &'c Client,
        path: impl Into<String>,
        key: &'static str,
        options: PaginationOptions,
    ) -> Self {
        Self {
            client,
            path: path.into(),
            key,
            options,
            page_index: 1,
            page_after: String::new(),
            has_more: true,
            buffer: VecDeque::new(),
        }
    }

    /// Returns true while another page may be fetched.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Fetches the next page.
    ///
    /// Items left over from [`next`](Self::next) are returned first as a
    /// page of their own. Returns `Ok(None)` once the listing is exhausted.
    pub async fn next_page(&mut self) -> Result<Option<Vec<T>>, ZendeskError> {
        if !self.buffer.is_empty() {
            return Ok(Some(self.buffer.drain(..).collect()));
        }
        if !self.has_more {
            return Ok(None);
        }

        let result = match self.options.strategy {
            Strategy::Offset => self.fetch_offset().await,
            Strategy::Cursor => self.fetch_cursor().await,
        };

        match result {
            Ok(items) => Ok(Some(items)),
            Err(e) => {
                self.has_more = false;
                Err(e)
            }
        }
    }

    /// Fetches the next single item, requesting pages as needed.
    ///
    /// Returns `Ok(None)` once the listing is exhausted.
    pub async fn next(&mut self) -> Result<Option<T>, ZendeskError> {
        while self.buffer.is_empty() {
            match self.next_page().await? {
                Some(items) => self.buffer.extend(items),
                None => return Ok(None),
            }
        }
        Ok(self.buffer.pop_front())
    }

    /// Collects all remaining items into a `Vec`.
    pub async fn collect_all(mut self) -> Result<Vec<T>, ZendeskError> {
        let mut all = Vec::new();
        while let Some(items) = self.next_page().await? {
            all.extend(items);
        }
        Ok(all)
    }

    async fn fetch_offset(&mut self) -> Result<Vec<T>, ZendeskError> {
        let opts = OffsetOptions {
            page: PageOptions::new(self.page_index, self.options.page_size),
            common: self.options.common.clone(),
        };
        let (items, page) = self.client.list_offset(&self.path, self.key, &opts).await?;

        tracing::debug!(
            path = %self.path,
            page = self.page_index,
            items = items.len(),
            has_next = page.has_next(),
            "Fetched offset page"
        );

        self.has_more = page.has_next();
        self.page_index += 1;
        Ok(items)
    }

    async fn fetch_cursor(&mut self) -> Result<Vec<T>, ZendeskError> {
        let opts = CursorOptions {
            cursor: CursorPagination {
                page_size: self.options.page_size,
                page_after: self.page_after.clone(),
                page_before: String::new(),
            },
            common: self.options.common.clone(),
        };
        let (items, meta) = self.client.list_cursor(&self.path, self.key, &opts).await?;

        tracing::debug!(
            path = %self.path,
            items = items.len(),
            has_more = meta.has_more,
            "Fetched cursor page"
        );

        // Without a cursor the next request would repeat the first page.
        self.has_more = meta.has_more && !meta.after_cursor.is_empty();
        self.page_after = meta.after_cursor;
        Ok(items)
    }
}
