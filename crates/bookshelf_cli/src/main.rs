//! Console entry point for the Bookshelf catalog.
//!
//! # Responsibility
//! - Open the catalog database named by `BOOKSHELF_DB`.
//! - Walk one CRUD sequence end to end and print each result.
//!
//! Emails and the ISBN are derived from a per-run tag so a rerun never
//! collides with rows a crashed earlier run left behind; the demo still
//! cleans up after itself on the happy path.

use bookshelf_core::db::{db_path_from_env, open_db};
use bookshelf_core::{
    core_version, AuthorService, BookService, SqliteAuthorRepository, SqliteBookRepository,
};
use std::error::Error;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("bookshelf: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let db_path = db_path_from_env();
    let mut conn = open_db(&db_path)?;
    println!(
        "bookshelf_core version={} database={}",
        core_version(),
        db_path.display()
    );

    let run_tag = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| format!("system clock is before the unix epoch: {err}"))?
        .as_nanos();

    let (ada, charles) = {
        let authors = AuthorService::new(SqliteAuthorRepository::try_new(&conn)?);

        let ada = authors.create_author("Ada Lovelace", format!("ada+{run_tag}@example.com"))?;
        println!("created author: {} <{}> id={}", ada.name, ada.email, ada.id);

        let charles =
            authors.create_author("Charles Babbage", format!("charles+{run_tag}@example.com"))?;
        println!(
            "created author: {} <{}> id={}",
            charles.name, charles.email, charles.id
        );

        println!("authors in catalog:");
        for author in authors.list_authors()? {
            println!("  - {} <{}>", author.name, author.email);
        }

        (ada, charles)
    };

    {
        let mut books = BookService::new(SqliteBookRepository::try_new(&mut conn)?);

        // 14 characters, inside the catalog's 10..=17 ISBN bounds.
        let demo_isbn = format!("RUN-{:010}", run_tag % 10_000_000_000);
        let mut book = books.create_book("Sketch of the Analytical Engine", Some(demo_isbn))?;
        println!("created book: {} id={}", book.title, book.id);

        let linked = books.set_book_authors(book.id, &[ada.id, charles.id])?;
        println!("linked authors for `{}`:", book.title);
        for author in &linked {
            println!("  - {}", author.name);
        }

        book.title = "Sketch of the Analytical Engine, with Notes".to_string();
        books.update_book(&book)?;
        let reloaded = books
            .get_book(book.id)?
            .ok_or("updated book vanished from storage")?;
        println!("updated book title: {}", reloaded.title);

        println!("books by {}:", ada.name);
        for item in books.books_of_author(ada.id)? {
            println!("  - {}", item.title);
        }

        books.delete_book(book.id)?;
        println!("deleted book {}", book.id);
        println!("books remaining: {}", books.list_books()?.len());
    }

    {
        let authors = AuthorService::new(SqliteAuthorRepository::try_new(&conn)?);
        authors.delete_author(ada.id)?;
        authors.delete_author(charles.id)?;
        println!(
            "deleted demo authors; remaining: {}",
            authors.list_authors()?.len()
        );
    }

    Ok(())
}
