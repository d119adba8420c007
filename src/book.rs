use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;
use serde::Serialize;

/// One catalog entry. `author` and `genres` hold ids into the catalog's
/// lookup tables, not display names.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    pub published: DateTime<Utc>,
}

impl Book {
    pub fn year(&self) -> i32 {
        self.published.year()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_record_with_timestamp() {
        let json = r#"{
            "id": "b1",
            "title": "Harry Potter",
            "author": "a1",
            "genres": ["g1", "g2"],
            "image": "https://example.com/b1.jpg",
            "description": "A boy wizard.",
            "published": "1997-06-26T00:00:00.000Z"
        }"#;

        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.id, "b1");
        assert_eq!(book.genres, vec!["g1", "g2"]);
        assert_eq!(book.year(), 1997);
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let json = r#"{"id":"b2","title":"T","author":"a1","published":"2001-01-01T00:00:00Z"}"#;

        let book: Book = serde_json::from_str(json).unwrap();
        assert!(book.genres.is_empty());
        assert!(book.image.is_empty());
        assert!(book.description.is_empty());
    }
}
