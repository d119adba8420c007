use tracing::warn;

use crate::theme::Theme;
use crate::view::BOOKS_PER_PAGE;

pub const PAGE_SIZE_VAR: &str = "BOOKS_PER_PAGE";
pub const THEME_VAR: &str = "BOOK_CATALOG_THEME";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub page_size: usize,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            page_size: BOOKS_PER_PAGE,
            theme: Theme::Day,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Config::from_vars(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`. Unusable values are logged and the
    /// default is kept.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let page_size = match lookup(PAGE_SIZE_VAR) {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => {
                    warn!("Ignoring {}={:?}, expected a positive integer", PAGE_SIZE_VAR, raw);
                    BOOKS_PER_PAGE
                }
            },
            None => BOOKS_PER_PAGE,
        };

        let preference = lookup(THEME_VAR);
        if let Some(ref raw) = preference {
            if raw.parse::<Theme>().is_err() {
                warn!("Ignoring {}={:?}, expected day or night", THEME_VAR, raw);
            }
        }

        Config {
            page_size,
            theme: Theme::detect(preference.as_deref()),
        }
    }

    pub fn with_page_size(mut self, page_size: Option<usize>) -> Self {
        if let Some(size) = page_size {
            self.page_size = size;
        }
        self
    }

    pub fn with_theme(mut self, theme: Option<Theme>) -> Self {
        if let Some(theme) = theme {
            self.theme = theme;
        }
        self
    }
}
