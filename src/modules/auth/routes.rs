//! Login, logout and registration handlers.

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use shelf_authz::{SessionGuard, LOGIN_PATH};
use shelf_db::RepoError;
use shelf_http::{AppResult, HtmlForm};

use super::views;
use crate::modules::books::routes::BOOKS_PATH;
use crate::modules::users::UserRepo;

#[derive(Clone)]
pub struct AuthState {
    pub users: UserRepo,
    pub guard: SessionGuard,
}

#[derive(Debug, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub error: Option<String>,
    pub registered: Option<String>,
}

pub async fn login_form(
    State(state): State<AuthState>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Response {
    if state.guard.current_user(&headers).await.is_some() {
        return Redirect::to(BOOKS_PATH).into_response();
    }

    Html(views::login_page(
        query.error.as_deref(),
        query.registered.is_some(),
    ))
    .into_response()
}

pub async fn login(
    State(state): State<AuthState>,
    headers: HeaderMap,
    HtmlForm(form): HtmlForm<Credentials>,
) -> AppResult<Response> {
    let username = form.username.trim();

    match state
        .users
        .verify_credentials(username, &form.password)
        .await?
    {
        Some(user) => {
            let (_, cookie) = state
                .guard
                .sign_in(&headers, user.id, &user.username)
                .await?;
            Ok(([(header::SET_COOKIE, cookie)], Redirect::to(BOOKS_PATH)).into_response())
        }
        None => {
            tracing::warn!(username, "login rejected");
            Ok(Redirect::to(&format!("{LOGIN_PATH}?error=invalid")).into_response())
        }
    }
}

pub async fn logout(State(state): State<AuthState>, headers: HeaderMap) -> AppResult<Response> {
    let cookie = state.guard.sign_out(&headers).await?;
    Ok(([(header::SET_COOKIE, cookie)], Redirect::to(LOGIN_PATH)).into_response())
}

pub async fn register_form(Query(query): Query<PageQuery>) -> Html<String> {
    Html(views::register_page(query.error.as_deref()))
}

pub async fn register(
    State(state): State<AuthState>,
    HtmlForm(form): HtmlForm<Credentials>,
) -> AppResult<Redirect> {
    let username = form.username.trim();
    if username.is_empty() || form.password.is_empty() {
        return Ok(Redirect::to("/auth/register?error=invalid"));
    }

    match state.users.add(username, &form.password).await {
        Ok(_) => Ok(Redirect::to(&format!("{LOGIN_PATH}?registered=1"))),
        Err(RepoError::Duplicate { .. }) => {
            tracing::info!(username, "registration with taken username");
            Ok(Redirect::to("/auth/register?error=taken"))
        }
        Err(err) => Err(err.into()),
    }
}
