use crate::error::{CatalogError, Result};

/// Sentinel for an unconstrained genre or author.
pub const ANY: &str = "any";

/// Active search constraints. `genre` and `author` hold ids or [`ANY`];
/// an empty `title` matches every book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub genre: String,
    pub author: String,
    pub title: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            genre: ANY.to_string(),
            author: ANY.to_string(),
            title: String::new(),
        }
    }
}

impl FilterCriteria {
    /// Builds criteria from submitted form fields. Blank or missing selects
    /// fall back to [`ANY`], the title is trimmed, unknown fields are ignored.
    pub fn from_form<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut criteria = FilterCriteria::default();
        for (key, value) in pairs {
            let value = value.as_ref().trim();
            match key.as_ref() {
                "genre" => criteria.genre = select_value(value),
                "author" => criteria.author = select_value(value),
                "title" => criteria.title = value.to_string(),
                _ => {}
            }
        }
        criteria
    }

    /// Parses a line such as `genre=g1 title=the lord of the rings`.
    /// Words without a `key=` prefix continue the preceding title.
    pub fn parse_query(line: &str) -> Result<Self> {
        let mut pairs: Vec<(&str, String)> = Vec::new();

        for token in line.split_whitespace() {
            match token.split_once('=') {
                Some((key, value)) => {
                    if !matches!(key, "genre" | "author" | "title") {
                        return Err(CatalogError::InvalidArgument(format!(
                            "unknown search field {:?}",
                            key
                        )));
                    }
                    pairs.push((key, value.to_string()));
                }
                None => match pairs.last_mut() {
                    Some(("title", title)) => {
                        title.push(' ');
                        title.push_str(token);
                    }
                    _ => {
                        return Err(CatalogError::InvalidArgument(format!(
                            "expected key=value, found {:?}",
                            token
                        )))
                    }
                },
            }
        }

        Ok(FilterCriteria::from_form(pairs))
    }

    pub fn is_unconstrained(&self) -> bool {
        self.genre == ANY && self.author == ANY && self.title.trim().is_empty()
    }
}

fn select_value(value: &str) -> String {
    if value.is_empty() {
        ANY.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_defaults_missing_fields() {
        let criteria = FilterCriteria::from_form(Vec::<(&str, &str)>::new());
        assert_eq!(criteria, FilterCriteria::default());
        assert!(criteria.is_unconstrained());
    }

    #[test]
    fn form_trims_and_defaults_blank_selects() {
        let criteria = FilterCriteria::from_form(vec![
            ("genre", "  "),
            ("author", "a7"),
            ("title", "  Harry "),
            ("theme", "night"),
        ]);

        assert_eq!(criteria.genre, ANY);
        assert_eq!(criteria.author, "a7");
        assert_eq!(criteria.title, "Harry");
        assert!(!criteria.is_unconstrained());
    }

    #[test]
    fn query_joins_title_words() {
        let criteria = FilterCriteria::parse_query("genre=g1 title=the lord of the rings").unwrap();
        assert_eq!(criteria.genre, "g1");
        assert_eq!(criteria.author, ANY);
        assert_eq!(criteria.title, "the lord of the rings");
    }

    #[test]
    fn query_rejects_unknown_field() {
        let err = FilterCriteria::parse_query("year=1999").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidArgument(_)));
    }

    #[test]
    fn query_rejects_stray_word() {
        assert!(FilterCriteria::parse_query("genre=g1 fantasy").is_err());
        assert!(FilterCriteria::parse_query("fantasy").is_err());
    }

    #[test]
    fn empty_query_is_unconstrained() {
        assert!(FilterCriteria::parse_query("   ").unwrap().is_unconstrained());
    }
}
