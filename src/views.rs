//! Server rendered HTML pages
//!
//! Every value that reaches a page goes through [`escape`] first.

use std::fmt::Write;

use crate::errors::Validation;

/// Replace the five HTML significant characters with entities
pub fn escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());

    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n\
         </head>\n\
         <body>\n\
         <main>\n\
         {body}\n\
         </main>\n\
         </body>\n\
         </html>\n",
        escape(title)
    )
}

fn messages<'a, I>(messages: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let items = messages.into_iter().fold(String::new(), |mut items, message| {
        let _ = write!(items, "<li>{}</li>", escape(message));
        items
    });

    if items.is_empty() {
        String::new()
    } else {
        format!("<ul class=\"errors\" role=\"alert\">{items}</ul>")
    }
}

pub fn index() -> String {
    page(
        "Welcome",
        "<h1>Welcome</h1>\n\
         <p><a href=\"/signup\">Sign up</a> or <a href=\"/login\">log in</a>.</p>",
    )
}

/// Signup form; username and email are re-filled, the password never is
pub fn signup(username: &str, email: &str, validation: &Validation) -> String {
    let body = format!(
        "<h1>Sign up</h1>\n\
         {}\n\
         <form method=\"post\" action=\"/signup\">\n\
         <label>Username <input type=\"text\" name=\"username\" value=\"{}\" required></label>\n\
         <label>Email <input type=\"email\" name=\"email\" value=\"{}\" required></label>\n\
         <label>Password <input type=\"password\" name=\"password\" required></label>\n\
         <button type=\"submit\">Sign up</button>\n\
         </form>\n\
         <p>Already registered? <a href=\"/login\">Log in</a></p>",
        messages(validation.messages()),
        escape(username),
        escape(email),
    );

    page("Sign up", &body)
}

pub fn login<'a, I>(email: &str, errors: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let body = format!(
        "<h1>Log in</h1>\n\
         {}\n\
         <form method=\"post\" action=\"/login\">\n\
         <label>Email <input type=\"email\" name=\"email\" value=\"{}\" required></label>\n\
         <label>Password <input type=\"password\" name=\"password\" required></label>\n\
         <button type=\"submit\">Log in</button>\n\
         </form>\n\
         <p>No account yet? <a href=\"/signup\">Sign up</a></p>",
        messages(errors),
        escape(email),
    );

    page("Log in", &body)
}

pub fn home(username: &str) -> String {
    let body = format!(
        "<h1>Welcome, {}</h1>\n\
         <p><a href=\"/logout\">Log out</a></p>",
        escape(username)
    );

    page("Home", &body)
}

pub fn error<'a, I>(title: &str, errors: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let body = format!(
        "<h1>{}</h1>\n\
         {}\n\
         <p><a href=\"/\">Back</a></p>",
        escape(title),
        messages(errors),
    );

    page(title, &body)
}
