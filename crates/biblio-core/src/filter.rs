//! Free-text filtering over the loaded catalog.
//!
//! Case-insensitive substring matching; a blank query keeps everything.
//! Books match on title, resolved author name, or ISBN; authors on name.

use crate::catalog::{Author, Book};

pub fn filter_books<'a>(books: &'a [Book], authors: &[Author], query: &str) -> Vec<&'a Book> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return books.iter().collect();
    }

    books
        .iter()
        .filter(|book| {
            let author_name = authors
                .iter()
                .find(|author| author.id == book.author_id)
                .map(|author| author.name.to_lowercase());
            book.title.to_lowercase().contains(&needle)
                || author_name.is_some_and(|name| name.contains(&needle))
                || book.isbn.to_lowercase().contains(&needle)
        })
        .collect()
}

pub fn filter_authors<'a>(authors: &'a [Author], query: &str) -> Vec<&'a Author> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return authors.iter().collect();
    }

    authors
        .iter()
        .filter(|author| author.name.to_lowercase().contains(&needle))
        .collect()
}

/// Number of loaded books attributed to the given author.
pub fn books_by_author(books: &[Book], author_id: i64) -> usize {
    books.iter().filter(|book| book.author_id == author_id).count()
}
