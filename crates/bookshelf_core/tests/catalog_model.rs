use bookshelf_core::{
    Author, AuthorValidationError, Book, BookValidationError,
};
use uuid::Uuid;

#[test]
fn author_accepts_boundary_name_lengths() {
    assert!(Author::new("A", "a@example.com").validate().is_ok());
    assert!(Author::new("x".repeat(255), "a@example.com")
        .validate()
        .is_ok());
}

#[test]
fn author_name_bounds_are_enforced() {
    assert_eq!(
        Author::new("", "a@example.com").validate(),
        Err(AuthorValidationError::EmptyName)
    );
    assert!(matches!(
        Author::new("x".repeat(256), "a@example.com").validate(),
        Err(AuthorValidationError::NameTooLong { length: 256 })
    ));
}

#[test]
fn author_email_syntax_is_checked() {
    assert!(Author::new("Ada", "ada.lovelace@mail.example.org")
        .validate()
        .is_ok());
    assert!(matches!(
        Author::new("Ada", "no-at-sign.example.com").validate(),
        Err(AuthorValidationError::InvalidEmail { .. })
    ));
}

#[test]
fn book_accepts_boundary_title_and_isbn_lengths() {
    assert!(Book::new("T", None).validate().is_ok());
    assert!(Book::new("x".repeat(500), None).validate().is_ok());
    assert!(Book::new("T", Some("0".repeat(10))).validate().is_ok());
    assert!(Book::new("T", Some("0".repeat(17))).validate().is_ok());
}

#[test]
fn book_title_and_isbn_bounds_are_enforced() {
    assert_eq!(
        Book::new("", None).validate(),
        Err(BookValidationError::EmptyTitle)
    );
    assert!(matches!(
        Book::new("x".repeat(501), None).validate(),
        Err(BookValidationError::TitleTooLong { length: 501 })
    ));
    assert!(matches!(
        Book::new("T", Some("0".repeat(9))).validate(),
        Err(BookValidationError::InvalidIsbnLength { length: 9 })
    ));
    assert!(matches!(
        Book::new("T", Some("0".repeat(18))).validate(),
        Err(BookValidationError::InvalidIsbnLength { length: 18 })
    ));
}

#[test]
fn length_limits_count_characters_not_bytes() {
    // 255 multibyte characters must pass even though the byte length is larger.
    let name: String = "é".repeat(255);
    assert!(name.len() > 255);
    assert!(Author::new(name, "a@example.com").validate().is_ok());
}

#[test]
fn author_serializes_with_stable_field_names() {
    let id = Uuid::nil();
    let author = Author::with_id(id, "Ada Lovelace", "ada@example.com");
    let json = serde_json::to_value(&author).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "id": "00000000-0000-0000-0000-000000000000",
            "name": "Ada Lovelace",
            "email": "ada@example.com",
        })
    );
}

#[test]
fn book_serde_roundtrip_preserves_optional_isbn() {
    let book = Book::new("Frankenstein", None);
    let json = serde_json::to_string(&book).unwrap();
    let back: Book = serde_json::from_str(&json).unwrap();
    assert_eq!(back, book);
    assert!(json.contains("\"isbn\":null"));
}
