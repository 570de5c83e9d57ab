use serde::{Deserialize, Serialize};

use crate::registry::Registry;
use crate::resource::Resource;
use crate::transaction::Transaction;

/// A book tracked by its remaining copy count.
///
/// The count is only mutated through the registry (loan out, return) or
/// an explicit [`restock`](Book::restock); it can never go negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub isbn: String,
    copies: u32,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        copies: u32,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            copies,
        }
    }

    /// Remaining copies on the shelf.
    pub fn copies(&self) -> u32 {
        self.copies
    }

    /// Add copies to the stock.
    pub fn restock(&mut self, additional: u32) {
        self.copies += additional;
    }
}

impl Resource for Book {
    /// The return date, recorded on the loan itself.
    type Closure = String;

    fn key(&self) -> &str {
        &self.isbn
    }

    fn is_available(&self) -> bool {
        self.copies > 0
    }

    fn hand_out(&mut self) {
        self.copies = self.copies.saturating_sub(1);
    }

    fn take_back(&mut self, _return_date: &String) {
        self.copies += 1;
    }
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} by {} [{}], {} in stock",
            self.title, self.author, self.isbn, self.copies
        )
    }
}

/// A registered library member. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Borrower {
    pub id: u32,
    pub name: String,
    pub email: String,
}

impl Borrower {
    pub fn new(id: u32, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}

impl std::fmt::Display for Borrower {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// The library registry: books plus loan history.
pub type Library = Registry<Book, Borrower>;

impl<P> Registry<Book, P> {
    /// Case-insensitive exact match on the title; first hit wins. The
    /// ISBN stays the natural key, titles are a convenience lookup.
    pub fn find_by_title(&self, query: &str) -> Option<&Book> {
        self.items()
            .iter()
            .find(|book| book.title.eq_ignore_ascii_case(query))
    }
}

/// A loan binds a borrower to a book; the closing value is the return date.
pub type Loan = Transaction<Borrower, String>;
