use bookshelf_core::db::migrations::latest_version;
use bookshelf_core::db::open_db_in_memory;
use bookshelf_core::{Book, BookRepository, BookService, RepoError, SqliteBookRepository};
use rusqlite::Connection;
use uuid::Uuid;

#[test]
fn insert_and_get_roundtrip_with_and_without_isbn() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&mut conn).unwrap();

    let plain = Book::new("Frankenstein", None);
    repo.insert_book(&plain).unwrap();

    let with_isbn = Book::new("Clean Architecture", Some("978-0-13-449416-6".to_string()));
    repo.insert_book(&with_isbn).unwrap();

    let loaded_plain = repo.get_book(plain.id).unwrap().unwrap();
    assert_eq!(loaded_plain.isbn, None);

    let loaded = repo.get_book(with_isbn.id).unwrap().unwrap();
    assert_eq!(loaded.isbn.as_deref(), Some("978-0-13-449416-6"));
}

#[test]
fn insert_preserves_externally_assigned_id() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&mut conn).unwrap();

    let external_id = Uuid::new_v4();
    let book = Book::with_id(external_id, "Frankenstein", None);
    let id = repo.insert_book(&book).unwrap();
    assert_eq!(id, external_id);
}

#[test]
fn list_is_ordered_by_title() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&mut conn).unwrap();

    repo.insert_book(&Book::new("Middlemarch", None)).unwrap();
    repo.insert_book(&Book::new("Frankenstein", None)).unwrap();

    let titles: Vec<String> = repo
        .list_books()
        .unwrap()
        .into_iter()
        .map(|book| book.title)
        .collect();
    assert_eq!(titles, ["Frankenstein", "Middlemarch"]);
}

#[test]
fn update_existing_book_and_clear_isbn() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&mut conn).unwrap();

    let mut book = Book::new("Draft Title", Some("0306406152".to_string()));
    repo.insert_book(&book).unwrap();

    book.title = "Final Title".to_string();
    book.isbn = None;
    repo.update_book(&book).unwrap();

    let loaded = repo.get_book(book.id).unwrap().unwrap();
    assert_eq!(loaded.title, "Final Title");
    assert_eq!(loaded.isbn, None);
}

#[test]
fn update_and_delete_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&mut conn).unwrap();

    let book = Book::new("Nowhere", None);
    let err = repo.update_book(&book).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == book.id));

    let err = repo.delete_book(book.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == book.id));
}

#[test]
fn validation_failure_blocks_insert_and_update() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&mut conn).unwrap();

    let empty_title = Book::new("  ", None);
    let err = repo.insert_book(&empty_title).unwrap_err();
    assert!(matches!(err, RepoError::BookValidation(_)));

    let mut valid = Book::new("Frankenstein", None);
    repo.insert_book(&valid).unwrap();

    valid.isbn = Some("123".to_string());
    let err = repo.update_book(&valid).unwrap_err();
    assert!(matches!(err, RepoError::BookValidation(_)));
}

#[test]
fn duplicate_isbn_surfaces_constraint_error() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&mut conn).unwrap();

    repo.insert_book(&Book::new("First Edition", Some("0306406152".to_string())))
        .unwrap();

    let reprint = Book::new("Second Edition", Some("0306406152".to_string()));
    let err = repo.insert_book(&reprint).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)), "unexpected error: {err}");
    assert!(err.to_string().contains("UNIQUE"));
}

#[test]
fn multiple_books_without_isbn_are_allowed() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&mut conn).unwrap();

    repo.insert_book(&Book::new("Untracked One", None)).unwrap();
    repo.insert_book(&Book::new("Untracked Two", None)).unwrap();

    assert_eq!(repo.list_books().unwrap().len(), 2);
}

#[test]
fn corrupted_row_is_reported_as_invalid_data_on_read() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&mut conn).unwrap();

    let book = Book::new("Frankenstein", None);
    repo.insert_book(&book).unwrap();

    // Damage the row behind the repository's back; the ISBN length rule
    // only exists in the model, not as a SQL constraint.
    conn.execute(
        "UPDATE books SET isbn = '123' WHERE id = ?1;",
        [book.id.to_string()],
    )
    .unwrap();

    let repo = SqliteBookRepository::try_new(&mut conn).unwrap();
    let err = repo.get_book(book.id).unwrap_err();
    assert!(
        matches!(err, RepoError::InvalidData(_)),
        "unexpected error: {err}"
    );

    let err = repo.list_books().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn service_wraps_repository_calls() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&mut conn).unwrap();
    let service = BookService::new(repo);

    let created = service.create_book("Frankenstein", None).unwrap();
    let fetched = service.get_book(created.id).unwrap().unwrap();
    assert_eq!(fetched, created);

    service.delete_book(created.id).unwrap();
    assert!(service.list_books().unwrap().is_empty());
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let mut conn = Connection::open_in_memory().unwrap();

    let result = SqliteBookRepository::try_new(&mut conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_required_link_table() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "CREATE TABLE books (id TEXT PRIMARY KEY NOT NULL, title TEXT NOT NULL, isbn TEXT);
         PRAGMA user_version = {};",
        latest_version()
    ))
    .unwrap();

    let result = SqliteBookRepository::try_new(&mut conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("author_books"))
    ));
}
