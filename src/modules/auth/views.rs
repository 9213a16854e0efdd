use shelf_http::html::page;

pub fn login_page(error: Option<&str>, registered: bool) -> String {
    let notice = match (error, registered) {
        (Some("invalid"), _) => r#"<p class="error">Invalid username or password.</p>"#,
        (Some(_), _) => r#"<p class="error">Login failed.</p>"#,
        (None, true) => r#"<p class="notice">Account created, please log in.</p>"#,
        (None, false) => "",
    };

    let body = format!(
        r#"<h1>Log in</h1>
{notice}
<form method="post" action="/auth/login">
<label>Username <input name="username" autocomplete="username" required></label>
<label>Password <input name="password" type="password" autocomplete="current-password" required></label>
<button type="submit">Log in</button>
</form>
<p>No account? <a href="/auth/register">Register</a></p>"#
    );

    page("Log in", &body)
}

pub fn register_page(error: Option<&str>) -> String {
    let notice = match error {
        Some("taken") => r#"<p class="error">That username is already taken.</p>"#,
        Some(_) => r#"<p class="error">Username and password are required.</p>"#,
        None => "",
    };

    let body = format!(
        r#"<h1>Register</h1>
{notice}
<form method="post" action="/auth/register">
<label>Username <input name="username" autocomplete="username" required></label>
<label>Password <input name="password" type="password" autocomplete="new-password" required></label>
<button type="submit">Create account</button>
</form>
<p>Already registered? <a href="/auth/login">Log in</a></p>"#
    );

    page("Register", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_page_reports_invalid_credentials() {
        assert!(login_page(Some("invalid"), false).contains("Invalid username or password."));
        assert!(!login_page(None, false).contains("class=\"error\""));
    }

    #[test]
    fn register_page_reports_taken_username() {
        assert!(register_page(Some("taken")).contains("already taken"));
    }
}
