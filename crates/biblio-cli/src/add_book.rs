//! Interactive add-book flow.
//!
//! Each entered value is fed through the form engine exactly as a field
//! edit; a qualifying title entry runs the metadata lookup and offers the
//! resulting suggestions for autofill before the remaining fields are
//! prompted. Validation failures re-prompt only the offending fields.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use biblio_client::{CatalogClient, MetadataClient};
use biblio_core::{Author, BookField};
use biblio_form::{AddBookForm, SubmitOutcome};

use crate::display;

/// At most this many suggestions are offered per lookup.
const SUGGESTION_DISPLAY_CAP: usize = 8;

const PROMPT_ORDER: [BookField; 5] = [
    BookField::AuthorId,
    BookField::Isbn,
    BookField::PublishedYear,
    BookField::Description,
    BookField::CoverUrl,
];

pub async fn run(
    catalog: &CatalogClient,
    metadata: &MetadataClient,
    roster: Vec<Author>,
    year: i32,
) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut form = AddBookForm::new(roster, year);

    prompt_field(&mut form, &mut input, metadata, BookField::Title).await?;
    for field in PROMPT_ORDER {
        prompt_field(&mut form, &mut input, metadata, field).await?;
    }

    loop {
        match form.submit(catalog, year).await.context("creating book")? {
            SubmitOutcome::Created(book) => {
                println!("Created:");
                display::book_card(&book, form.roster());
                return Ok(());
            }
            SubmitOutcome::Invalid => {
                println!("Please fix the following:");
                let invalid: Vec<BookField> = form.errors().iter().map(|(field, _)| field).collect();
                for (field, message) in form.errors().iter() {
                    println!("  {:<14} {}", field.as_str(), message);
                }
                for field in invalid {
                    prompt_field(&mut form, &mut input, metadata, field).await?;
                }
            }
        }
    }
}

/// Prompt one field and feed the entered value through the form.
///
/// An empty entry keeps the field's current value. A title entry that
/// dispatches a lookup runs it and offers the suggestions.
async fn prompt_field(
    form: &mut AddBookForm,
    input: &mut impl BufRead,
    metadata: &MetadataClient,
    field: BookField,
) -> anyhow::Result<()> {
    if field == BookField::AuthorId {
        print_roster(form.roster());
    }

    let current = current_value(form, field);
    let entered = read_line(input, &prompt_label(field, &current))?;
    if entered.is_empty() {
        return Ok(());
    }

    let request = form.edit(field, &entered);
    if let Some(request) = request {
        println!("Searching…");
        form.run_lookup(metadata, request).await;
        offer_suggestions(form, input)?;
    }
    Ok(())
}

fn offer_suggestions(form: &mut AddBookForm, input: &mut impl BufRead) -> anyhow::Result<()> {
    let results = form.search().results();
    if results.is_empty() {
        println!("No results");
        return Ok(());
    }

    let shown = results.len().min(SUGGESTION_DISPLAY_CAP);
    for (i, suggestion) in results.iter().take(shown).enumerate() {
        display::suggestion_line(i + 1, suggestion);
    }

    let choice = read_line(input, &format!("Use a suggestion [1-{shown}] or Enter to skip: "))?;
    if let Ok(index) = choice.parse::<usize>() {
        if (1..=shown).contains(&index) && form.select_suggestion(index - 1) {
            println!("Autofilled from \"{}\"", form.draft().title);
            if let Some(message) = form.errors().get(BookField::AuthorId) {
                println!("  note: {message}");
            }
        }
    }
    Ok(())
}

fn print_roster(roster: &[Author]) {
    if roster.is_empty() {
        println!("No authors on file yet — add one with `biblio add-author`.");
        return;
    }
    println!("Known authors:");
    for author in roster {
        println!("  #{:<4} {}", author.id, author.name);
    }
}

fn current_value(form: &AddBookForm, field: BookField) -> String {
    let draft = form.draft();
    match field {
        BookField::Title => draft.title.clone(),
        BookField::AuthorId if draft.author_id == 0 => String::new(),
        BookField::AuthorId => draft.author_id.to_string(),
        BookField::Isbn => draft.isbn.clone(),
        BookField::PublishedYear => draft.published_year.to_string(),
        BookField::Description => draft.description.clone(),
        BookField::CoverUrl => draft.cover_url.clone(),
    }
}

fn prompt_label(field: BookField, current: &str) -> String {
    let label = match field {
        BookField::Title => "Title",
        BookField::AuthorId => "Author id",
        BookField::Isbn => "ISBN",
        BookField::PublishedYear => "Published year",
        BookField::Description => "Description",
        BookField::CoverUrl => "Cover URL",
    };
    if current.is_empty() {
        format!("{label}: ")
    } else {
        format!("{label} [{current}]: ")
    }
}

fn read_line(input: &mut impl BufRead, prompt: &str) -> anyhow::Result<String> {
    print!("{prompt}");
    io::stdout().flush().context("flushing prompt")?;
    let mut line = String::new();
    let read = input.read_line(&mut line).context("reading input")?;
    if read == 0 {
        anyhow::bail!("input ended before the form was complete");
    }
    Ok(line.trim().to_string())
}
