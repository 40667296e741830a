//! HTML page rendering.
//!
//! Small string-building helpers instead of a template engine; every dynamic
//! value goes through [`escape`] before it reaches a page.

use crate::domains::tools::Tool;

/// Escape a value for interpolation into HTML text or attributes.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn layout(title: &str, user_email: Option<&str>, body: &str) -> String {
    let nav = match user_email {
        Some(email) => format!(
            r#"<nav><span>{}</span>
<a href="/">Inventory</a>
<a href="/create">Add tool</a>
<form method="post" action="/logout"><button type="submit">Log out</button></form>
</nav>"#,
            escape(email)
        ),
        None => r#"<nav><a href="/login">Log in</a> <a href="/register">Register</a></nav>"#
            .to_string(),
    };

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Tool Inventory</title>
<style>
body {{ font-family: sans-serif; margin: 2rem auto; max-width: 48rem; }}
nav {{ display: flex; gap: 1rem; align-items: center; margin-bottom: 1.5rem; }}
nav form {{ margin: 0; }}
table {{ border-collapse: collapse; width: 100%; }}
th, td {{ text-align: left; padding: 0.4rem 0.6rem; border-bottom: 1px solid #ddd; }}
td form {{ display: inline; }}
.error {{ color: #b00020; }}
label {{ display: block; margin-top: 0.8rem; }}
</style>
</head>
<body>
{nav}
{body}
</body>
</html>
"#,
        title = escape(title),
    )
}

/// The inventory list, doubling as the search-results page.
pub fn index_page(user_email: &str, tools: &[Tool], query: Option<&str>) -> String {
    let mut body = String::new();

    let query_value = query.map(escape).unwrap_or_default();
    body.push_str(&format!(
        r#"<h1>Tool Inventory</h1>
<form method="get" action="/search">
<input type="search" name="query" value="{query_value}" placeholder="Search tools" required>
<button type="submit">Search</button>
</form>
"#
    ));

    if tools.is_empty() {
        let message = if query.is_some() {
            "No tools match your search."
        } else {
            "No tools yet."
        };
        body.push_str(&format!("<p>{message}</p>\n"));
    } else {
        body.push_str("<table>\n<tr><th>Name</th><th>Quantity</th><th>Description</th><th></th></tr>\n");
        for tool in tools {
            body.push_str(&format!(
                r#"<tr>
<td>{name}</td>
<td>
<form method="post" action="/update_quantity/{id}">
<button type="submit" name="action" value="decrement">-</button>
{quantity}
<button type="submit" name="action" value="increment">+</button>
</form>
</td>
<td>{description}</td>
<td>
<a href="/edit/{id}">Edit</a>
<form method="post" action="/delete/{id}"><button type="submit">Delete</button></form>
</td>
</tr>
"#,
                name = escape(&tool.name),
                quantity = tool.quantity,
                description = escape(&tool.description),
                id = tool.id,
            ));
        }
        body.push_str("</table>\n");
    }

    layout("Inventory", Some(user_email), &body)
}

/// The create/edit form. With a tool supplied the form posts to the edit
/// route and is pre-filled; without one it posts to the create route.
pub fn tool_form_page(user_email: &str, tool: Option<&Tool>) -> String {
    let (title, action, name, description, quantity) = match tool {
        Some(tool) => (
            "Edit tool",
            format!("/edit/{}", tool.id),
            escape(&tool.name),
            escape(&tool.description),
            tool.quantity,
        ),
        None => ("Add tool", "/create".to_string(), String::new(), String::new(), 0),
    };

    let body = format!(
        r#"<h1>{title}</h1>
<form method="post" action="{action}">
<label>Name <input type="text" name="name" value="{name}" required></label>
<label>Description <input type="text" name="description" value="{description}"></label>
<label>Quantity <input type="number" name="quantity" value="{quantity}" min="0" required></label>
<button type="submit">Save</button>
</form>
"#
    );

    layout(title, Some(user_email), &body)
}

/// The login form, optionally with a failure message.
pub fn login_page(error: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Log in</h1>
{error}<form method="post" action="/login">
<label>Email <input type="email" name="email" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Log in</button>
</form>
<p>No account? <a href="/register">Register</a></p>
"#,
        error = error_banner(error),
    );
    layout("Log in", None, &body)
}

/// The registration form, optionally with a failure message.
pub fn register_page(error: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Register</h1>
{error}<form method="post" action="/register">
<label>Email <input type="email" name="email" required></label>
<label>Password <input type="password" name="password" minlength="8" required></label>
<button type="submit">Register</button>
</form>
<p>Already registered? <a href="/login">Log in</a></p>
"#,
        error = error_banner(error),
    );
    layout("Register", None, &body)
}

fn error_banner(error: Option<&str>) -> String {
    match error {
        Some(message) => format!("<p class=\"error\">{}</p>\n", escape(message)),
        None => String::new(),
    }
}
