//! Card-style terminal rendering for catalog records and suggestions.
//!
//! Labelled lines under a title rule; absent optional fields are skipped
//! rather than printed blank.

use biblio_core::{Author, Book, Suggestion};

pub fn book_card(book: &Book, roster: &[Author]) {
    let author = book
        .author_name
        .clone()
        .or_else(|| {
            roster
                .iter()
                .find(|a| a.id == book.author_id)
                .map(|a| a.name.clone())
        })
        .unwrap_or_else(|| format!("author #{}", book.author_id));

    println!("── {} ──", book.title);
    line("author", &author);
    line("year", &book.published_year.to_string());
    line("isbn", &book.isbn);
    if let Some(description) = &book.description {
        line("description", description);
    }
    if let Some(cover) = &book.cover_url {
        line("cover", cover);
    }
    if let Some(categories) = &book.categories {
        if !categories.is_empty() {
            line("categories", &categories.join(", "));
        }
    }
    println!();
}

pub fn author_card(author: &Author, book_count: usize) {
    println!("── {} ──", author.name);
    line("id", &author.id.to_string());
    line("books", &book_count.to_string());
    if let Some(birth_year) = author.birth_year {
        line("born", &birth_year.to_string());
    }
    if let Some(country) = &author.country {
        line("country", country);
    }
    if let Some(bio) = &author.bio {
        line("bio", bio);
    }
    println!();
}

/// One dropdown-style line per suggestion, 1-indexed for selection.
pub fn suggestion_line(index: usize, suggestion: &Suggestion) {
    let mut detail = suggestion.authors.join(", ");
    if let Some(year) = suggestion.published_year {
        detail.push_str(&format!(" • {year}"));
    }
    if let Some(isbn13) = &suggestion.isbn13 {
        detail.push_str(&format!(" • ISBN: {isbn13}"));
    }
    println!("  [{index}] {}", suggestion.title);
    if !detail.is_empty() {
        println!("      {detail}");
    }
}

fn line(label: &str, value: &str) {
    println!("  {label:<12} {value}");
}
