//! Record storage.
//!
//! The catalogue lives in process memory for the lifetime of the server;
//! nothing is persisted across restarts.

mod catalogue;
mod models;

pub use catalogue::BookStore;
pub use models::{Book, BookPatch, NewBook, BOOK_FIELDS};
