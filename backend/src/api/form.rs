use rocket::response::content::RawHtml;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>YouTube Channel Export</title>
    <style>
        body { font-family: sans-serif; max-width: 32rem; margin: 4rem auto; }
        input[type=text] { width: 100%; padding: 0.5rem; margin: 0.5rem 0; }
        .error { color: #b00020; }
    </style>
</head>
<body>
    <h1>YouTube Channel Export</h1>
"#;

const PAGE_FORM: &str = r#"    <form method="post" action="/">
        <label for="channel_name">Channel name</label>
        <input type="text" id="channel_name" name="channel_name" required>
        <button type="submit">Export to Excel</button>
    </form>
</body>
</html>
"#;

/// The single-field export form, optionally with an error line above it.
pub fn render_form(error_message: Option<&str>) -> RawHtml<String> {
    let mut page = String::from(PAGE_HEAD);
    if let Some(message) = error_message {
        page.push_str(&format!(
            "    <p class=\"error\">{}</p>\n",
            html_escape::encode_text(message)
        ));
    }
    page.push_str(PAGE_FORM);
    RawHtml(page)
}
