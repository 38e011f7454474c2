//! Page requests and paged results.

use serde::{Deserialize, Serialize};

use crate::config::PagingSettings;

/// A normalized, 1-based page request.
///
/// Both fields are always at least 1; construct through [`PageRequest::new`]
/// or [`PageRequest::normalize`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Exact page request; zero values are raised to 1.
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page: page.max(1),
            size: size.max(1),
        }
    }

    /// Build a request from raw caller input.
    ///
    /// Missing or non-positive page numbers fall back to the first page,
    /// missing or non-positive sizes fall back to the configured default and
    /// oversized requests are clamped to the configured maximum.
    pub fn normalize(page: Option<i64>, size: Option<i64>, settings: &PagingSettings) -> Self {
        let page = match page {
            Some(p) if p >= 1 => u32::try_from(p).unwrap_or(u32::MAX),
            _ => 1,
        };
        let size = match size {
            Some(s) if s >= 1 => u32::try_from(s).unwrap_or(u32::MAX),
            _ => settings.default_page_size,
        };
        Self::new(page, size.min(settings.max_page_size))
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of elements preceding this page.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.size as usize)
    }
}

/// One page of an ordered collection plus the paging metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let size = u64::from(request.size());
        Self {
            content,
            page_number: request.page(),
            page_size: request.size(),
            total_elements,
            total_pages: total_elements.div_ceil(size),
        }
    }

    /// Slice an already filtered and ordered sequence into the requested page.
    pub fn from_iter_paged<I>(items: I, request: PageRequest) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut total = 0u64;
        let mut content = Vec::new();
        let start = request.offset();
        let end = start.saturating_add(request.size() as usize);
        for (index, item) in items.into_iter().enumerate() {
            total += 1;
            if index >= start && index < end {
                content.push(item);
            }
        }
        Self::new(content, request, total)
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}
