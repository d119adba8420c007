pub mod book;
pub mod browser;
pub mod commands;
pub mod config;
pub mod dataset;
pub mod error;
pub mod filters;
pub mod render;
pub mod theme;
pub mod view;

pub use book::Book;
pub use browser::Browser;
pub use config::Config;
pub use dataset::{Catalog, LookupTable};
pub use error::{CatalogError, Result};
pub use filters::{FilterCriteria, ANY};
pub use theme::Theme;
pub use view::{apply_filters, page_range, remaining, ShowMore, BOOKS_PER_PAGE};
