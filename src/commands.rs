//! Line commands for the interactive session.

use std::io::Write;

use crate::book::Book;
use crate::browser::Browser;
use crate::error::{CatalogError, Result};
use crate::filters::FilterCriteria;
use crate::render;
use crate::theme::Theme;

pub const HELP: &str = "\
commands:
  search [genre=ID] [author=ID] [title=TEXT]   filter the catalog
  more                                         show the next page
  show ID                                      open a book
  close                                        close the open book
  theme day|night|toggle                       change the theme
  options                                      list genres and authors
  help                                         this message
  quit                                         leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(FilterCriteria),
    More,
    Show(String),
    Close,
    Theme(Option<Theme>),
    Options,
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name {
            "search" => Ok(Command::Search(FilterCriteria::parse_query(rest)?)),
            "more" => Ok(Command::More),
            "show" if !rest.is_empty() => Ok(Command::Show(rest.to_string())),
            "show" => Err(CatalogError::InvalidArgument("show needs a book id".to_string())),
            "close" => Ok(Command::Close),
            "theme" => match rest {
                "toggle" => Ok(Command::Theme(None)),
                other => Ok(Command::Theme(Some(other.parse()?))),
            },
            "options" => Ok(Command::Options),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CatalogError::InvalidArgument(format!(
                "unknown command {:?}, try help",
                other
            ))),
        }
    }
}

/// Writes the revealed matches followed by the list footer.
pub fn write_list<W: Write>(browser: &Browser, out: &mut W) -> Result<()> {
    write_items(browser, browser.visible(), out)
}

fn write_items<W: Write>(browser: &Browser, books: &[Book], out: &mut W) -> Result<()> {
    let catalog = browser.catalog();
    let theme = browser.theme();
    if let Some(message) = render::list_message(browser.matches()) {
        writeln!(out, "{}", render::paint(message, theme))?;
    } else {
        write!(out, "{}", render::previews(books, catalog))?;
    }
    writeln!(
        out,
        "{}",
        render::paint(&render::show_more_label(&browser.show_more_state()), theme)
    )?;
    Ok(())
}

pub fn execute<W: Write>(browser: &mut Browser, command: Command, out: &mut W) -> Result<Flow> {
    match command {
        Command::Search(filters) => {
            browser.search(filters);
            write_list(browser, out)?;
        }
        Command::More => match browser.show_more() {
            Some(revealed) => {
                let revealed = revealed.to_vec();
                write_items(browser, &revealed, out)?;
            }
            None => writeln!(out, "Nothing more to show")?,
        },
        Command::Show(id) => {
            let book = browser.select(&id)?;
            write!(out, "{}", render::detail(book, browser.catalog()))?;
        }
        Command::Close => browser.close_detail(),
        Command::Theme(theme) => {
            let theme = theme.unwrap_or_else(|| browser.theme().toggle());
            browser.save_settings(theme);
            writeln!(out, "{}", render::paint(&format!("Theme: {}", theme), theme))?;
        }
        Command::Options => write!(out, "{}", render::search_options(browser.catalog()))?,
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Quit => return Ok(Flow::Stop),
    }
    Ok(Flow::Continue)
}
