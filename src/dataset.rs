use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::Path;

use csv::Writer;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::book::Book;
use crate::error::{CatalogError, Result};

/// Id to display-name table, kept in file order so option lists render the
/// way the data source lists them.
#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl LookupTable {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = LookupTable::default();
        for (id, name) in entries {
            table.insert(id.into(), name.into());
        }
        table
    }

    fn insert(&mut self, id: String, name: String) {
        match self.index.get(&id) {
            Some(&pos) => self.entries[pos].1 = name,
            None => {
                self.index.insert(id.clone(), self.entries.len());
                self.entries.push((id, name));
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.index.get(id).map(|&pos| self.entries[pos].1.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(id, name)| (id.as_str(), name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn from_value(name: &str, value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            CatalogError::InvalidDataset(format!(
                "{} must be an object, found {}",
                name,
                kind(value)
            ))
        })?;

        let mut table = LookupTable::default();
        for (id, display) in object {
            let display = display.as_str().ok_or_else(|| {
                CatalogError::InvalidDataset(format!("{} entry {:?} is not a string", name, id))
            })?;
            table.insert(id.clone(), display.to_string());
        }
        Ok(table)
    }
}

/// The immutable dataset: books plus the author and genre tables.
#[derive(Debug, Clone)]
pub struct Catalog {
    books: Vec<Book>,
    authors: LookupTable,
    genres: LookupTable,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(books: Vec<Book>, authors: LookupTable, genres: LookupTable) -> Result<Self> {
        let by_id = validate(&books, &authors, &genres)?;
        Ok(Catalog {
            books,
            authors,
            genres,
            by_id,
        })
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(input)?;
        let field = |name: &str| {
            root.get(name)
                .ok_or_else(|| CatalogError::InvalidDataset(format!("missing field {:?}", name)))
        };

        let books = books_from_value(field("books")?)?;
        let authors = LookupTable::from_value("authors", field("authors")?)?;
        let genres = LookupTable::from_value("genres", field("genres")?)?;

        Catalog::new(books, authors, genres)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let catalog = Catalog::from_json_str(&contents)?;
        info!(
            "Loaded {} books, {} authors, {} genres from {}",
            catalog.books.len(),
            catalog.authors.len(),
            catalog.genres.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn book(&self, id: &str) -> Option<&Book> {
        self.by_id.get(id).map(|&pos| &self.books[pos])
    }

    pub fn authors(&self) -> &LookupTable {
        &self.authors
    }

    pub fn genres(&self) -> &LookupTable {
        &self.genres
    }

    pub fn author_name(&self, id: &str) -> Option<&str> {
        self.authors.get(id)
    }

    pub fn genre_name(&self, id: &str) -> Option<&str> {
        self.genres.get(id)
    }

    pub fn export_csv_file<P: AsRef<Path>>(&self, path: P, books: &[Book]) -> Result<()> {
        let file = fs::File::create(path.as_ref())?;
        export_csv(self, books, file)?;
        info!("Exported {} books to {}", books.len(), path.as_ref().display());
        Ok(())
    }
}

fn validate(
    books: &[Book],
    authors: &LookupTable,
    genres: &LookupTable,
) -> Result<HashMap<String, usize>> {
    let mut by_id = HashMap::with_capacity(books.len());
    let mut unknown_genres = HashSet::new();

    for (pos, book) in books.iter().enumerate() {
        if by_id.insert(book.id.clone(), pos).is_some() {
            return Err(CatalogError::InvalidDataset(format!(
                "duplicate book id {:?}",
                book.id
            )));
        }
        if !authors.contains(&book.author) {
            return Err(CatalogError::InvalidDataset(format!(
                "unknown author {:?} on book {:?}",
                book.author, book.id
            )));
        }
        for genre in &book.genres {
            if !genres.contains(genre) && unknown_genres.insert(genre.clone()) {
                warn!("Book {:?} references unknown genre {:?}", book.id, genre);
            }
        }
    }

    Ok(by_id)
}

/// Decodes a book collection: either an array of books or an object whose
/// values are books, taken in document order.
pub fn books_from_value(value: &Value) -> Result<Vec<Book>> {
    let items: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => map.values().collect(),
        other => {
            return Err(CatalogError::InvalidDataset(format!(
                "expected a collection of books, found {}",
                kind(other)
            )))
        }
    };

    let mut books = Vec::with_capacity(items.len());
    for (pos, item) in items.into_iter().enumerate() {
        let book = Book::deserialize(item).map_err(|e| {
            CatalogError::InvalidDataset(format!("book at position {}: {}", pos, e))
        })?;
        books.push(book);
    }
    debug!("Decoded {} books", books.len());
    Ok(books)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Serialize, Debug)]
struct CsvRecord<'a> {
    id: &'a str,
    title: &'a str,
    author: &'a str,
    genres: String,
    published: String,
    image: &'a str,
}

/// Writes one CSV row per book with author and genre ids resolved to names.
pub fn export_csv<W: io::Write>(catalog: &Catalog, books: &[Book], writer: W) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    for book in books {
        let genres = book
            .genres
            .iter()
            .map(|id| catalog.genre_name(id).unwrap_or(id))
            .collect::<Vec<&str>>()
            .join(";");
        wtr.serialize(CsvRecord {
            id: &book.id,
            title: &book.title,
            author: catalog.author_name(&book.author).unwrap_or(&book.author),
            genres,
            published: book.published.to_rfc3339(),
            image: &book.image,
        })?;
    }
    wtr.flush()?;
    Ok(())
}
