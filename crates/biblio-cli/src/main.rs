use anyhow::Context;
use biblio_client::catalog::DEFAULT_API_BASE;
use biblio_client::{
    CatalogClient, MetadataClient, MetadataConfig, MockAuthorService, SystemClock,
};
use biblio_core::{
    Author, Clock, CreateAuthorInput, RosterProvider, books_by_author, filter_authors,
    filter_books,
};
use clap::{Parser, Subcommand};

mod add_book;
mod display;

#[derive(Parser)]
#[command(name = "biblio", version, about = "Library catalog client")]
struct Cli {
    /// Base URL of the catalog persistence API.
    #[arg(long, env = "BIBLIO_API_BASE_URL", default_value = DEFAULT_API_BASE)]
    api_url: String,

    /// Access key for the external book-metadata index.
    #[arg(long, env = "BIBLIO_BOOKS_API_KEY")]
    books_api_key: Option<String>,

    /// Country code passed to the metadata index.
    #[arg(long, env = "BIBLIO_COUNTRY", default_value = "US")]
    country: String,

    /// Serve the author roster from the built-in mock service.
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List books, optionally filtered by title, author name, or ISBN.
    Books {
        #[arg(long)]
        filter: Option<String>,
    },
    /// List authors, optionally filtered by name.
    Authors {
        #[arg(long)]
        filter: Option<String>,
    },
    /// Add a new author.
    AddAuthor {
        #[arg(long)]
        name: String,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        birth_year: Option<i32>,
        #[arg(long)]
        country: Option<String>,
    },
    /// Add a book interactively, with title autocomplete.
    AddBook,
    /// Ask the catalog API to import a book by ISBN.
    ImportIsbn { isbn: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    tracing::debug!(api_url = %cli.api_url, mock = cli.mock, "biblio starting");
    let catalog = CatalogClient::new(cli.api_url.clone());

    match cli.command {
        Command::Books { ref filter } => {
            let books = catalog.list_books().await.context("listing books")?;
            let roster = load_roster(&catalog, cli.mock).await?;
            let query = filter.as_deref().unwrap_or("");
            let hits = filter_books(&books, &roster, query);
            if hits.is_empty() {
                println!("No books found matching your search.");
            }
            for book in hits {
                display::book_card(book, &roster);
            }
        }
        Command::Authors { ref filter } => {
            let roster = load_roster(&catalog, cli.mock).await?;
            // Book counts are best-effort; the author listing still renders
            // without them.
            let books = match catalog.list_books().await {
                Ok(books) => books,
                Err(error) => {
                    tracing::warn!(%error, "book counts unavailable");
                    Vec::new()
                }
            };
            let query = filter.as_deref().unwrap_or("");
            let hits = filter_authors(&roster, query);
            if hits.is_empty() {
                println!("No authors found matching your search.");
            }
            for author in hits {
                display::author_card(author, books_by_author(&books, author.id));
            }
        }
        Command::AddAuthor {
            name,
            bio,
            birth_year,
            country,
        } => {
            let input = CreateAuthorInput {
                name,
                bio,
                birth_year,
                country,
            };
            let author = if cli.mock {
                MockAuthorService::new().create_author(&input).await
            } else {
                catalog
                    .create_author(&input)
                    .await
                    .context("creating author")?
            };
            println!("Created:");
            display::author_card(&author, 0);
        }
        Command::AddBook => {
            let roster = load_roster(&catalog, cli.mock).await?;
            let metadata = MetadataClient::new(MetadataConfig {
                api_key: cli.books_api_key.clone(),
                country: cli.country.clone(),
            });
            add_book::run(&catalog, &metadata, roster, SystemClock.current_year()).await?;
        }
        Command::ImportIsbn { ref isbn } => {
            let book = catalog
                .import_by_isbn(isbn)
                .await
                .context("importing book")?;
            println!("Imported:");
            display::book_card(&book, &[]);
        }
    }

    Ok(())
}

/// Fetch the author roster from the catalog API or the mock service.
async fn load_roster(catalog: &CatalogClient, mock: bool) -> anyhow::Result<Vec<Author>> {
    if mock {
        fetch_roster(&MockAuthorService::new()).await
    } else {
        fetch_roster(catalog).await
    }
}

async fn fetch_roster<R: RosterProvider>(provider: &R) -> anyhow::Result<Vec<Author>> {
    provider
        .list_authors()
        .await
        .map_err(anyhow::Error::new)
        .context("listing authors")
}
