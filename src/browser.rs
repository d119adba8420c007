use tracing::{debug, info};

use crate::book::Book;
use crate::config::Config;
use crate::dataset::Catalog;
use crate::error::{CatalogError, Result};
use crate::filters::FilterCriteria;
use crate::theme::Theme;
use crate::view::{apply_filters, page_range, page_slice, ShowMore};

/// Browsing state for one session over a catalog: the active filters, their
/// matches, how many pages have been revealed, the open book and the theme.
#[derive(Debug)]
pub struct Browser<'a> {
    catalog: &'a Catalog,
    page_size: usize,
    page: usize,
    filters: FilterCriteria,
    matches: Vec<Book>,
    active: Option<String>,
    theme: Theme,
}

impl<'a> Browser<'a> {
    pub fn new(catalog: &'a Catalog, config: Config) -> Result<Self> {
        if config.page_size == 0 {
            return Err(CatalogError::InvalidArgument(
                "page size must be at least 1".to_string(),
            ));
        }
        Ok(Browser {
            catalog,
            page_size: config.page_size,
            page: 1,
            filters: FilterCriteria::default(),
            matches: catalog.books().to_vec(),
            active: None,
            theme: config.theme,
        })
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    pub fn matches(&self) -> &[Book] {
        &self.matches
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Replaces the matches with a fresh filter pass and starts over at page 1.
    pub fn search(&mut self, filters: FilterCriteria) -> &[Book] {
        self.matches = apply_filters(self.catalog.books(), &filters);
        self.filters = filters;
        self.page = 1;
        self.active = None;
        info!(
            "Search {:?} matched {} books",
            self.filters,
            self.matches.len()
        );
        &self.matches
    }

    /// Reveals the next page. Returns the newly shown books, or `None` when
    /// nothing is left to show.
    pub fn show_more(&mut self) -> Option<&[Book]> {
        if !self.show_more_state().enabled {
            debug!("Show more ignored on page {}", self.page);
            return None;
        }
        self.page += 1;
        debug!("Showing page {}", self.page);
        page_slice(&self.matches, self.page, self.page_size).ok()
    }

    pub fn show_more_state(&self) -> ShowMore {
        ShowMore::new(&self.matches, self.page, self.page_size)
    }

    pub fn current_page_items(&self) -> &[Book] {
        page_slice(&self.matches, self.page, self.page_size).unwrap_or(&[])
    }

    /// Every match revealed so far, from page 1 through the current page.
    pub fn visible(&self) -> &[Book] {
        let end = page_range(self.page, self.page_size)
            .map(|range| range.end.min(self.matches.len()))
            .unwrap_or(0);
        &self.matches[..end]
    }

    /// Opens the detail view for any book of the catalog, filtered or not.
    pub fn select(&mut self, id: &str) -> Result<&'a Book> {
        let book = self
            .catalog
            .book(id)
            .ok_or_else(|| CatalogError::InvalidArgument(format!("no book with id {:?}", id)))?;
        self.active = Some(book.id.clone());
        Ok(book)
    }

    pub fn active(&self) -> Option<&'a Book> {
        self.active.as_deref().and_then(|id| self.catalog.book(id))
    }

    pub fn close_detail(&mut self) {
        self.active = None;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn save_settings(&mut self, theme: Theme) {
        if theme != self.theme {
            info!("Theme changed to {}", theme);
        }
        self.theme = theme;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::LookupTable;
    use chrono::{TimeZone, Utc};

    fn catalog(count: usize) -> Catalog {
        let books = (0..count)
            .map(|i| Book {
                id: format!("b{}", i),
                title: if i % 2 == 0 {
                    format!("Even {}", i)
                } else {
                    format!("Odd {}", i)
                },
                author: if i % 2 == 0 { "a1" } else { "a2" }.to_string(),
                genres: vec!["g1".to_string()],
                image: String::new(),
                description: String::new(),
                published: Utc.with_ymd_and_hms(1990, 5, 1, 0, 0, 0).unwrap(),
            })
            .collect();
        Catalog::new(
            books,
            LookupTable::new(vec![("a1", "Ann"), ("a2", "Bob")]),
            LookupTable::new(vec![("g1", "Fantasy")]),
        )
        .unwrap()
    }

    fn config(page_size: usize) -> Config {
        Config {
            page_size,
            theme: Theme::Day,
        }
    }

    #[test]
    fn starts_on_first_page_with_all_books() {
        let catalog = catalog(50);
        let browser = Browser::new(&catalog, Config::default()).unwrap();

        assert_eq!(browser.page(), 1);
        assert_eq!(browser.matches().len(), 50);
        assert_eq!(browser.visible().len(), 36);
        assert_eq!(browser.show_more_state().remaining, 14);
    }

    #[test]
    fn show_more_advances_until_exhausted() {
        let catalog = catalog(50);
        let mut browser = Browser::new(&catalog, Config::default()).unwrap();

        let revealed = browser.show_more().unwrap();
        assert_eq!(revealed.len(), 14);
        assert_eq!(revealed[0].id, "b36");
        assert_eq!(browser.page(), 2);
        assert_eq!(browser.visible().len(), 50);

        assert!(browser.show_more().is_none());
        assert_eq!(browser.page(), 2);
        assert!(!browser.show_more_state().enabled);
    }

    #[test]
    fn search_resets_page_and_detail() {
        let catalog = catalog(20);
        let mut browser = Browser::new(&catalog, config(4)).unwrap();
        browser.show_more();
        browser.select("b3").unwrap();

        let found = browser.search(FilterCriteria {
            author: "a2".to_string(),
            ..FilterCriteria::default()
        });
        assert_eq!(found.len(), 10);
        assert_eq!(browser.page(), 1);
        assert!(browser.active().is_none());
        assert_eq!(browser.current_page_items().len(), 4);
        assert_eq!(browser.show_more_state().remaining, 6);
    }

    #[test]
    fn empty_search_disables_show_more() {
        let catalog = catalog(10);
        let mut browser = Browser::new(&catalog, config(4)).unwrap();

        browser.search(FilterCriteria {
            title: "missing".to_string(),
            ..FilterCriteria::default()
        });

        assert!(browser.is_empty());
        assert!(browser.visible().is_empty());
        assert_eq!(
            browser.show_more_state(),
            ShowMore {
                remaining: 0,
                enabled: false
            }
        );
        assert!(browser.show_more().is_none());
    }

    #[test]
    fn select_unknown_book_fails() {
        let catalog = catalog(3);
        let mut browser = Browser::new(&catalog, config(4)).unwrap();

        assert!(matches!(
            browser.select("nope"),
            Err(CatalogError::InvalidArgument(_))
        ));
        assert_eq!(browser.select("b1").unwrap().title, "Odd 1");
        assert_eq!(browser.active().unwrap().id, "b1");
        browser.close_detail();
        assert!(browser.active().is_none());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let catalog = catalog(3);
        assert!(Browser::new(&catalog, config(0)).is_err());
    }

    #[test]
    fn settings_change_theme() {
        let catalog = catalog(1);
        let mut browser = Browser::new(&catalog, config(4)).unwrap();
        browser.save_settings(Theme::Night);
        assert_eq!(browser.theme(), Theme::Night);
    }
}
