use serde::Deserialize;

/// A book on the shelf.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Book {
    /// Store-assigned identifier, stable for the book's lifetime
    pub id: i64,
    pub title: String,
    pub author: String,
}

/// Form submitted to add a book.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBook {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
}

/// Form submitted to update a book. `id` arrives as text from a hidden field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBook {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub new_title: String,
    #[serde(default)]
    pub new_author: String,
}
