//! Filtering and pagination over the book collection.
//!
//! Everything here is a pure function of its arguments. Callers own the
//! current page and the filtered result set and pass them in on each call.

use std::ops::Range;

use serde_json::Value;
use tracing::{debug, error};

use crate::book::Book;
use crate::dataset::books_from_value;
use crate::error::{CatalogError, Result};
use crate::filters::{FilterCriteria, ANY};

pub const BOOKS_PER_PAGE: usize = 36;

/// Index range `[start, end)` of a 1-based page.
pub fn page_range(page: usize, page_size: usize) -> Result<Range<usize>> {
    if page < 1 {
        return Err(CatalogError::InvalidArgument(format!(
            "page must be at least 1, got {}",
            page
        )));
    }
    if page_size == 0 {
        return Err(CatalogError::InvalidArgument(
            "page size must be at least 1".to_string(),
        ));
    }

    let start = (page - 1)
        .checked_mul(page_size)
        .ok_or_else(|| overflow(page))?;
    let end = start.checked_add(page_size).ok_or_else(|| overflow(page))?;

    Ok(start..end)
}

pub fn next_page_range(page: usize, page_size: usize) -> Result<Range<usize>> {
    let current = page_range(page, page_size)?;
    let end = current
        .end
        .checked_add(page_size)
        .ok_or_else(|| overflow(page))?;
    Ok(current.end..end)
}

fn overflow(page: usize) -> CatalogError {
    CatalogError::InvalidArgument(format!("page {} is out of range", page))
}

/// The books of `matches` that land on `page`, clamped to the collection.
pub fn page_slice(matches: &[Book], page: usize, page_size: usize) -> Result<&[Book]> {
    let range = page_range(page, page_size)?;
    let start = range.start.min(matches.len());
    let end = range.end.min(matches.len());
    Ok(&matches[start..end])
}

pub fn matches_genre(book: &Book, genre: &str) -> bool {
    genre == ANY || book.genres.iter().any(|g| g == genre)
}

pub fn matches_title(book: &Book, title: &str) -> bool {
    title.trim().is_empty() || book.title.to_lowercase().contains(&title.to_lowercase())
}

pub fn matches_author(book: &Book, author: &str) -> bool {
    author == ANY || book.author == author
}

pub fn matches(book: &Book, filters: &FilterCriteria) -> bool {
    matches_genre(book, &filters.genre)
        && matches_title(book, &filters.title)
        && matches_author(book, &filters.author)
}

/// Books satisfying every active criterion, in their original order.
pub fn apply_filters(books: &[Book], filters: &FilterCriteria) -> Vec<Book> {
    let filtered: Vec<Book> = books
        .iter()
        .filter(|book| matches(book, filters))
        .cloned()
        .collect();

    debug!(
        "Filters {:?} kept {} of {} books",
        filters,
        filtered.len(),
        books.len()
    );
    filtered
}

/// Like [`apply_filters`] for an untyped collection. A value that is not a
/// collection of books is logged and treated as empty so the view stays usable.
pub fn filter_book_data(data: &Value, filters: &FilterCriteria) -> Vec<Book> {
    match books_from_value(data) {
        Ok(books) => apply_filters(&books, filters),
        Err(e) => {
            error!("Invalid book data: {}", e);
            Vec::new()
        }
    }
}

/// Number of matches not yet revealed after `page` pages.
pub fn remaining(total: usize, page: usize, page_size: usize) -> usize {
    let shown_end = page.saturating_mul(page_size).min(total);
    total.saturating_sub(shown_end)
}

/// State of the "show more" control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowMore {
    pub remaining: usize,
    pub enabled: bool,
}

impl ShowMore {
    pub fn new(matches: &[Book], page: usize, page_size: usize) -> Self {
        let remaining = remaining(matches.len(), page, page_size);
        ShowMore {
            remaining,
            enabled: remaining > 0,
        }
    }
}
