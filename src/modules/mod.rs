pub mod auth;
pub mod books;
pub mod users;

use std::sync::Arc;

use shelf_authz::SessionGuard;
use shelf_kernel::ModuleRegistry;
use sqlx::SqlitePool;

/// Register all application modules, handing each its repositories.
///
/// `users` comes first so its table exists before anything that reads it.
pub fn register_all(
    registry: &mut ModuleRegistry,
    db: &SqlitePool,
    guard: &SessionGuard,
) -> anyhow::Result<()> {
    let users = users::UserRepo::new(db.clone());
    let books = books::BookRepo::new(db.clone());

    registry.register(Arc::new(users::UsersModule::new()))?;
    registry.register(Arc::new(auth::AuthModule::new(users, guard.clone())))?;
    registry.register(Arc::new(books::BooksModule::new(books, guard.clone())))?;
    Ok(())
}
