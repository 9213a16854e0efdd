//! Book listing and form handlers.

use axum::extract::{Path, State};
use axum::response::{Html, Redirect};

use shelf_authz::CurrentUser;
use shelf_http::{AppResult, HtmlForm};

use super::models::{CreateBook, UpdateBook};
use super::repo::BookRepo;
use super::views;
use crate::utils::{parse_id, require_fields};

/// Where every book form lands after success.
pub const BOOKS_PATH: &str = "/books/";

#[derive(Clone)]
pub struct BooksState {
    pub repo: BookRepo,
}

pub async fn index() -> Redirect {
    Redirect::to(BOOKS_PATH)
}

pub async fn list_books(
    State(state): State<BooksState>,
    user: CurrentUser,
) -> AppResult<Html<String>> {
    let books = state.repo.all().await?;
    Ok(Html(views::book_list(&user, &books)))
}

pub async fn create_book(
    State(state): State<BooksState>,
    user: CurrentUser,
    HtmlForm(form): HtmlForm<CreateBook>,
) -> AppResult<Redirect> {
    let [title, author] = require_fields([
        ("title", form.title.as_str()),
        ("author", form.author.as_str()),
    ])?;

    let book = state.repo.add(&title, &author).await?;
    tracing::debug!(book_id = book.id, username = %user.username, "book created from form");

    Ok(Redirect::to(BOOKS_PATH))
}

pub async fn update_book(
    State(state): State<BooksState>,
    HtmlForm(form): HtmlForm<UpdateBook>,
) -> AppResult<Redirect> {
    let id = parse_id(&form.id)?;
    let [title, author] = require_fields([
        ("new_title", form.new_title.as_str()),
        ("new_author", form.new_author.as_str()),
    ])?;

    state.repo.update(id, &title, &author).await?;
    Ok(Redirect::to(BOOKS_PATH))
}

pub async fn delete_book(
    State(state): State<BooksState>,
    Path(id): Path<String>,
) -> AppResult<Redirect> {
    let id = parse_id(&id)?;
    state.repo.delete(id).await?;
    Ok(Redirect::to(BOOKS_PATH))
}
