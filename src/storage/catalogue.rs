//! In-memory book catalogue.

use serde_json::Value;
use tokio::sync::RwLock;

use super::models::{Book, BookPatch, NewBook};

/// Shared, ordered list of books.
///
/// Lookups are linear scans. Every mutation holds the write lock for its
/// whole duration, so id assignment and append happen as one step and
/// concurrent creates can never hand out the same id.
pub struct BookStore {
    books: RwLock<Vec<Book>>,
}

impl BookStore {
    /// Empty catalogue.
    pub fn new() -> Self {
        Self::from_books(Vec::new())
    }

    /// Catalogue holding `books` as given.
    pub fn from_books(books: Vec<Book>) -> Self {
        BookStore {
            books: RwLock::new(books),
        }
    }

    /// Catalogue of `count` placeholder books: `Book i` by `Author i`, ids 1..=count.
    pub fn with_placeholder_books(count: usize) -> Self {
        let books = (1..=count as u64)
            .map(|i| Book {
                id: i,
                title: Value::String(format!("Book {}", i)),
                author: Value::String(format!("Author {}", i)),
            })
            .collect();
        Self::from_books(books)
    }

    /// Number of books.
    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    /// True when the catalogue holds no books.
    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }

    /// Snapshot of every book in insertion order.
    pub async fn all(&self) -> Vec<Book> {
        self.books.read().await.clone()
    }

    /// Books `[(page - 1) * limit, page * limit)`; empty when out of range.
    ///
    /// `page` is 1-based; `page == 0` yields an empty page.
    pub async fn page(&self, page: usize, limit: usize) -> Vec<Book> {
        let books = self.books.read().await;
        let Some(start) = page.checked_sub(1).and_then(|p| p.checked_mul(limit)) else {
            return Vec::new();
        };
        if start >= books.len() {
            return Vec::new();
        }
        let end = start.saturating_add(limit).min(books.len());
        books[start..end].to_vec()
    }

    /// Books whose author is exactly `author`.
    pub async fn by_author(&self, author: &str) -> Vec<Book> {
        self.books
            .read()
            .await
            .iter()
            .filter(|book| book.has_author(author))
            .cloned()
            .collect()
    }

    /// Copy of the book with `id`.
    pub async fn get(&self, id: u64) -> Option<Book> {
        self.books
            .read()
            .await
            .iter()
            .find(|book| book.id == id)
            .cloned()
    }

    /// Whether a book with `id` exists.
    pub async fn contains(&self, id: u64) -> bool {
        self.books.read().await.iter().any(|book| book.id == id)
    }

    /// Appends a book with id `max(id) + 1` (1 for an empty catalogue).
    pub async fn insert(&self, new_book: NewBook) -> Book {
        let mut books = self.books.write().await;
        let id = books.iter().map(|book| book.id).max().unwrap_or(0) + 1;
        let book = Book {
            id,
            title: new_book.title,
            author: new_book.author,
        };
        books.push(book.clone());
        book
    }

    /// Merges `patch` into the book with `id`; `None` if there is no such book.
    pub async fn update(&self, id: u64, patch: BookPatch) -> Option<Book> {
        let mut books = self.books.write().await;
        let book = books.iter_mut().find(|book| book.id == id)?;
        patch.apply(book);
        Some(book.clone())
    }

    /// Removes and returns the book with `id`.
    pub async fn remove(&self, id: u64) -> Option<Book> {
        let mut books = self.books.write().await;
        let index = books.iter().position(|book| book.id == id)?;
        Some(books.remove(index))
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::new()
    }
}
