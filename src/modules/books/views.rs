use shelf_authz::CurrentUser;
use shelf_http::html::{escape, page};

use super::models::Book;

/// Heading of the book listing page.
pub const LISTING_HEADING: &str = "My Books";

pub fn book_list(user: &CurrentUser, books: &[Book]) -> String {
    let rows: String = if books.is_empty() {
        r#"<tr><td colspan="4">The shelf is empty.</td></tr>"#.to_string()
    } else {
        books.iter().map(book_row).collect()
    };

    let body = format!(
        r#"<header>
<p>Signed in as <strong>{username}</strong> · <a href="/auth/logout">Log out</a></p>
</header>
<h1>{heading}</h1>
<table>
<thead><tr><th>Title</th><th>Author</th><th>Edit</th><th></th></tr></thead>
<tbody>
{rows}
</tbody>
</table>
<h2>Add a book</h2>
<form method="post" action="/books">
<label>Title <input name="title" required></label>
<label>Author <input name="author" required></label>
<button type="submit">Add</button>
</form>"#,
        username = escape(&user.username),
        heading = LISTING_HEADING,
        rows = rows,
    );

    page(LISTING_HEADING, &body)
}

fn book_row(book: &Book) -> String {
    let title = escape(&book.title);
    let author = escape(&book.author);

    format!(
        r#"<tr id="book-{id}">
<td>{title}</td>
<td>{author}</td>
<td><form method="post" action="/books/update">
<input type="hidden" name="id" value="{id}">
<input name="new_title" value="{title}" required>
<input name="new_author" value="{author}" required>
<button type="submit">Save</button>
</form></td>
<td><form method="post" action="/books/delete/{id}"><button type="submit">Delete</button></form></td>
</tr>
"#,
        id = book.id,
        title = title,
        author = author,
    )
}
