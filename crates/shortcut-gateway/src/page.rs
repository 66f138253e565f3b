//! The two HTML pages served to browsers.

pub const HOME: &str = r#"<!DOCTYPE html>
<html>
    <head><title>URL Shortener</title></head>
    <body>
        <h1>URL Shortener</h1>
        <form action="/shorten" method="post">
            <input type="url" name="url" placeholder="Enter URL to shorten" required>
            <button type="submit">Shorten</button>
        </form>
    </body>
</html>
"#;

/// Escapes text for use inside HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
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

pub fn shortened(long_url: &str, short_url: &str) -> String {
    let long_url = escape(long_url);
    let short_url = escape(short_url);
    format!(
        r#"<!DOCTYPE html>
<html>
    <head><title>URL Shortened</title></head>
    <body>
        <h1>URL Shortened</h1>
        <p>Original URL: {long_url}</p>
        <p>Shortened URL: <a href="{short_url}">{short_url}</a></p>
        <a href="/">Shorten another URL</a>
    </body>
</html>
"#
    )
}
