//! Book records and the request bodies that create or change them.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error_handling::ApiError;

/// Field names a book body may carry.
pub const BOOK_FIELDS: &[&str] = &["title", "author"];

/// A catalogue entry.
///
/// `title` and `author` hold whatever JSON value the client sent; only the
/// presence of the keys is validated on create.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Book {
    /// Unique, never reassigned while the book exists
    pub id: u64,
    /// Title as sent by the client
    pub title: Value,
    /// Author as sent by the client
    pub author: Value,
}

impl Book {
    /// Whether the author is the string `author`, compared exactly.
    pub fn has_author(&self, author: &str) -> bool {
        self.author.as_str() == Some(author)
    }
}

/// Validated body of a create request.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    /// Title of the new book
    pub title: Value,
    /// Author of the new book
    pub author: Value,
}

impl NewBook {
    /// Builds a create body from any JSON-convertible values.
    pub fn new(title: impl Into<Value>, author: impl Into<Value>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
        }
    }
}

impl TryFrom<Map<String, Value>> for NewBook {
    type Error = ApiError;

    /// Requires both `title` and `author`. Other keys are ignored.
    fn try_from(mut body: Map<String, Value>) -> Result<Self, Self::Error> {
        match (body.remove("title"), body.remove("author")) {
            (Some(title), Some(author)) => Ok(NewBook { title, author }),
            _ => Err(ApiError::InvalidBookData),
        }
    }
}

/// Validated body of an update request. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookPatch {
    /// Replacement title
    pub title: Option<Value>,
    /// Replacement author
    pub author: Option<Value>,
}

impl BookPatch {
    /// Overwrites the fields present in the patch.
    pub fn apply(self, book: &mut Book) {
        if let Some(title) = self.title {
            book.title = title;
        }
        if let Some(author) = self.author {
            book.author = author;
        }
    }
}

impl TryFrom<Map<String, Value>> for BookPatch {
    type Error = ApiError;

    /// Rejects the whole body if any key is not a book field, even when the
    /// book fields present are fine.
    fn try_from(mut body: Map<String, Value>) -> Result<Self, Self::Error> {
        if body.keys().any(|key| !BOOK_FIELDS.contains(&key.as_str())) {
            return Err(ApiError::InvalidBookData);
        }
        Ok(BookPatch {
            title: body.remove("title"),
            author: body.remove("author"),
        })
    }
}
