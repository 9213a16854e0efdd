//! Shelf application library
//!
//! Book and user modules plus the bootstrap that wires them to the database,
//! the session store and the HTTP server.

pub mod app;
pub mod modules;
pub mod utils;

pub use app::App;
pub use modules::books::{Book, BookRepo};
pub use modules::users::{User, UserRepo};

#[cfg(test)]
pub(crate) mod test_support {
    use shelf_kernel::settings::DatabaseSettings;
    use sqlx::SqlitePool;

    use crate::modules::{books, users};

    /// Fresh in-memory database with every table created.
    pub async fn migrated_pool() -> SqlitePool {
        let pool = shelf_db::connect(&DatabaseSettings {
            url: "sqlite::memory:".to_string(),
            ..DatabaseSettings::default()
        })
        .await
        .unwrap();

        let migrations: Vec<_> = users::migrations()
            .into_iter()
            .map(|migration| ("users".to_string(), migration))
            .chain(
                books::migrations()
                    .into_iter()
                    .map(|migration| ("books".to_string(), migration)),
            )
            .collect();

        shelf_db::run_migrations(&pool, &migrations).await.unwrap();
        pool
    }
}
