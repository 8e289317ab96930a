//! Book API HTTP handlers.

mod books;
mod fallback;

pub use books::{create_book, delete_book, list_books, update_book};
pub use fallback::{method_not_allowed, not_found};
