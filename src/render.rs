//! Text rendering of previews, search options and the detail view.

use std::fmt::Write;

use crate::book::Book;
use crate::dataset::{Catalog, LookupTable};
use crate::filters::ANY;
use crate::theme::Theme;
use crate::view::ShowMore;

pub const EMPTY_MESSAGE: &str = "No results found. Your filters might be too narrow.";

const UNKNOWN_AUTHOR: &str = "Unknown author";

fn author_of<'c>(book: &'c Book, catalog: &'c Catalog) -> &'c str {
    catalog.author_name(&book.author).unwrap_or(UNKNOWN_AUTHOR)
}

pub fn preview(book: &Book, catalog: &Catalog) -> String {
    format!("[{}] {} — {}", book.id, book.title, author_of(book, catalog))
}

pub fn previews(books: &[Book], catalog: &Catalog) -> String {
    let mut out = String::new();
    for book in books {
        out.push_str(&preview(book, catalog));
        out.push('\n');
    }
    out
}

pub fn show_more_label(state: &ShowMore) -> String {
    if state.enabled {
        format!("Show more ({})", state.remaining)
    } else {
        format!("Show more ({}) (disabled)", state.remaining)
    }
}

pub fn list_message(matches: &[Book]) -> Option<&'static str> {
    if matches.is_empty() {
        Some(EMPTY_MESSAGE)
    } else {
        None
    }
}

fn options(out: &mut String, heading: &str, default_text: &str, table: &LookupTable) {
    let _ = writeln!(out, "{}:", heading);
    let _ = writeln!(out, "  {}: {}", ANY, default_text);
    for (id, name) in table.iter() {
        let _ = writeln!(out, "  {}: {}", id, name);
    }
}

/// Genre and author choices, each led by the unconstrained option.
pub fn search_options(catalog: &Catalog) -> String {
    let mut out = String::new();
    options(&mut out, "Genres", "All Genres", catalog.genres());
    options(&mut out, "Authors", "All Authors", catalog.authors());
    out
}

pub fn subtitle(book: &Book, catalog: &Catalog) -> String {
    format!("{} ({})", author_of(book, catalog), book.year())
}

pub fn detail(book: &Book, catalog: &Catalog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", book.title);
    let _ = writeln!(out, "{}", subtitle(book, catalog));
    if !book.genres.is_empty() {
        let names: Vec<&str> = book
            .genres
            .iter()
            .map(|id| catalog.genre_name(id).unwrap_or(id))
            .collect();
        let _ = writeln!(out, "Genres: {}", names.join(", "));
    }
    if !book.image.is_empty() {
        let _ = writeln!(out, "Cover: {}", book.image);
    }
    if !book.description.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", book.description);
    }
    out
}

/// Wraps `text` in 24-bit ANSI colours: dark on light.
pub fn paint(text: &str, theme: Theme) -> String {
    let colors = theme.colors();
    let (fr, fg, fb) = colors.dark;
    let (br, bg, bb) = colors.light;
    format!(
        "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m{}\x1b[0m",
        fr, fg, fb, br, bg, bb, text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn fixture() -> Catalog {
        let book = Book {
            id: "b1".to_string(),
            title: "Dune".to_string(),
            author: "a1".to_string(),
            genres: vec!["g2".to_string(), "g1".to_string()],
            image: "https://example.com/dune.jpg".to_string(),
            description: "Spice must flow.".to_string(),
            published: Utc.with_ymd_and_hms(1965, 8, 1, 0, 0, 0).unwrap(),
        };
        Catalog::new(
            vec![book],
            LookupTable::new(vec![("a1", "Frank Herbert")]),
            LookupTable::new(vec![("g1", "Adventure"), ("g2", "Science Fiction")]),
        )
        .unwrap()
    }

    #[test]
    fn preview_shows_author_name() {
        let catalog = fixture();
        assert_eq!(
            preview(&catalog.books()[0], &catalog),
            "[b1] Dune — Frank Herbert"
        );
        assert_eq!(previews(catalog.books(), &catalog).lines().count(), 1);
    }

    #[test]
    fn show_more_label_counts() {
        let enabled = ShowMore {
            remaining: 14,
            enabled: true,
        };
        let disabled = ShowMore {
            remaining: 0,
            enabled: false,
        };
        assert_eq!(show_more_label(&enabled), "Show more (14)");
        assert_eq!(show_more_label(&disabled), "Show more (0) (disabled)");
    }

    #[test]
    fn empty_matches_get_message() {
        let catalog = fixture();
        assert_eq!(list_message(&[]), Some(EMPTY_MESSAGE));
        assert_eq!(list_message(catalog.books()), None);
    }

    #[test]
    fn options_lead_with_any() {
        let text = search_options(&fixture());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Genres:",
                "  any: All Genres",
                "  g1: Adventure",
                "  g2: Science Fiction",
                "Authors:",
                "  any: All Authors",
                "  a1: Frank Herbert",
            ]
        );
    }

    #[test]
    fn detail_has_subtitle_with_year() {
        let catalog = fixture();
        let text = detail(&catalog.books()[0], &catalog);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Dune");
        assert_eq!(lines[1], "Frank Herbert (1965)");
        assert_eq!(lines[2], "Genres: Science Fiction, Adventure");
        assert!(text.ends_with("Spice must flow.\n"));
    }

    #[test]
    fn paint_uses_theme_colors() {
        let text = paint("x", Theme::Night);
        assert!(text.starts_with("\x1b[38;2;255;255;255m\x1b[48;2;10;10;20m"));
        assert!(text.ends_with("x\x1b[0m"));
    }
}
