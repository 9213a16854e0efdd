use shelf_db::{RepoError, RepoResult};
use sqlx::SqlitePool;

use super::models::Book;

const ENTITY: &str = "book";

/// Data access for books.
#[derive(Debug, Clone)]
pub struct BookRepo {
    pool: SqlitePool,
}

impl BookRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All books, oldest first.
    pub async fn all(&self) -> RepoResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT id, title, author FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    pub async fn get_by_id(&self, id: i64) -> RepoResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT id, title, author FROM books WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    pub async fn add(&self, title: &str, author: &str) -> RepoResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            "INSERT INTO books (title, author) VALUES (?, ?) RETURNING id, title, author",
        )
        .bind(title)
        .bind(author)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(book_id = book.id, "book added");
        Ok(book)
    }

    /// Replace title and author of an existing book.
    pub async fn update(&self, id: i64, new_title: &str, new_author: &str) -> RepoResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            "UPDATE books SET title = ?, author = ? WHERE id = ? RETURNING id, title, author",
        )
        .bind(new_title)
        .bind(new_author)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepoError::not_found(ENTITY, id))?;

        tracing::info!(book_id = id, "book updated");
        Ok(book)
    }

    pub async fn delete(&self, id: i64) -> RepoResult<()> {
        let deleted = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(RepoError::not_found(ENTITY, id));
        }

        tracing::info!(book_id = id, "book deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::migrated_pool;

    async fn repo() -> BookRepo {
        BookRepo::new(migrated_pool().await)
    }

    #[tokio::test]
    async fn added_book_appears_in_all() {
        let repo = repo().await;
        let book = repo.add("Test Book", "Test Author").await.unwrap();

        let books = repo.all().await.unwrap();
        assert_eq!(books, vec![book.clone()]);
        assert_eq!(book.title, "Test Book");
        assert_eq!(book.author, "Test Author");
    }

    #[tokio::test]
    async fn all_is_ordered_by_id() {
        let repo = repo().await;
        let first = repo.add("Dune", "Frank Herbert").await.unwrap();
        let second = repo.add("Solaris", "Stanisław Lem").await.unwrap();

        let ids: Vec<_> = repo.all().await.unwrap().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
        assert!(first.id < second.id);
    }

    #[tokio::test]
    async fn update_changes_fields_and_keeps_id() {
        let repo = repo().await;
        let book = repo.add("Test Book", "Test Author").await.unwrap();

        let updated = repo.update(book.id, "New Title", "New Author").await.unwrap();
        assert_eq!(updated.id, book.id);

        let stored = repo.get_by_id(book.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "New Title");
        assert_eq!(stored.author, "New Author");
    }

    #[tokio::test]
    async fn update_of_missing_book_is_not_found() {
        let repo = repo().await;
        let err = repo.update(404, "x", "y").await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound { entity: "book", .. }));
    }

    #[tokio::test]
    async fn deleted_book_is_gone() {
        let repo = repo().await;
        let book = repo.add("Test Book", "Test Author").await.unwrap();

        repo.delete(book.id).await.unwrap();
        assert!(repo.get_by_id(book.id).await.unwrap().is_none());

        let err = repo.delete(book.id).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound { .. }));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = repo().await;
        let first = repo.add("A", "a").await.unwrap();
        repo.delete(first.id).await.unwrap();

        let second = repo.add("B", "b").await.unwrap();
        assert_ne!(first.id, second.id);
    }
}
