//! Upload form page.

/// Render the upload form with `default_date` pre-filled.
pub fn render_index(title: &str, default_date: &str) -> String {
    let title = escape_html(title);
    let default_date = escape_html(default_date);

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
<h1>{title}</h1>
<form method="post" action="/upload" enctype="multipart/form-data">
  <p><label>Date <input type="date" name="date" value="{default_date}"></label></p>
  <p><label>Slug <input type="text" name="slug" placeholder="optional"></label></p>
  <p><label>Note <textarea name="note" rows="4"></textarea></label></p>
  <p><input type="file" name="files" multiple accept="image/*,video/*,.heic,.avif"></p>
  <p><button type="submit">Upload</button></p>
</form>
</body>
</html>
"#
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
