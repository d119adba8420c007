use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use book_catalog::commands::{self, Command, Flow};
use book_catalog::{render, Browser, Catalog, Config, FilterCriteria, Result, Theme};

#[derive(Parser)]
#[command(name = "book-catalog")]
#[command(version, about = "Browse a book catalog from the terminal", long_about = None)]
#[command(after_help = "EXAMPLES:
    book-catalog books.json                      List the first page
    book-catalog books.json --title harry        Filter by title
    book-catalog books.json --show b1            Show one book
    book-catalog books.json -i                   Interactive session")]
struct Cli {
    /// Dataset file (JSON with books, authors and genres)
    #[arg(value_name = "DATASET")]
    dataset: PathBuf,

    /// Genre id to filter by
    #[arg(long)]
    genre: Option<String>,

    /// Author id to filter by
    #[arg(long)]
    author: Option<String>,

    /// Case-insensitive title fragment
    #[arg(long)]
    title: Option<String>,

    /// Reveal pages 1 through N
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,

    /// Books per page [env: BOOKS_PER_PAGE]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    page_size: Option<u32>,

    /// Print the detail view of a book
    #[arg(long, value_name = "ID")]
    show: Option<String>,

    /// List the genre and author options
    #[arg(long)]
    options: bool,

    /// Colour theme, day or night [env: BOOK_CATALOG_THEME]
    #[arg(long)]
    theme: Option<Theme>,

    /// Write the matching books to a CSV file
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// Read commands from stdin
    #[arg(short, long)]
    interactive: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("book_catalog=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let catalog = Catalog::load(&cli.dataset)?;
    let config = Config::from_env()
        .with_page_size(cli.page_size.map(|size| size as usize))
        .with_theme(cli.theme);
    let mut browser = Browser::new(&catalog, config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.options {
        write!(out, "{}", render::search_options(&catalog))?;
    }

    let filters = FilterCriteria::from_form([
        ("genre", cli.genre.unwrap_or_default()),
        ("author", cli.author.unwrap_or_default()),
        ("title", cli.title.unwrap_or_default()),
    ]);
    browser.search(filters);
    for _ in 1..cli.page {
        if browser.show_more().is_none() {
            break;
        }
    }

    if let Some(path) = &cli.export {
        catalog.export_csv_file(path, browser.matches())?;
    }

    match &cli.show {
        Some(id) => {
            let book = browser.select(id)?;
            write!(out, "{}", render::detail(book, &catalog))?;
        }
        None if !cli.interactive => commands::write_list(&browser, &mut out)?,
        None => {}
    }

    if cli.interactive {
        commands::write_list(&browser, &mut out)?;
        interact(&mut browser, io::stdin().lock(), &mut out)?;
    }

    Ok(())
}

fn interact<R: BufRead, W: Write>(browser: &mut Browser, input: R, out: &mut W) -> Result<()> {
    info!("Interactive session started, type help for commands");
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let outcome = match Command::parse(&line) {
            Ok(command) => commands::execute(browser, command, out),
            Err(e) => Err(e),
        };
        match outcome {
            Ok(Flow::Stop) => break,
            Ok(Flow::Continue) => {}
            Err(e) => {
                error!("{}", e);
                writeln!(out, "error: {}", e)?;
            }
        }
        out.flush()?;
    }
    Ok(())
}
