use crate::pages::response::{Notice, NoticeLevel};

/// Escapes user-supplied text for use in element content and quoted attributes.
pub fn escape(text: &str) -> String {
    ammonia::clean_text(text)
}

pub fn escape_opt(text: Option<&str>) -> String {
    text.map(escape).unwrap_or_default()
}

fn notice_html(notice: Option<&Notice>) -> String {
    match notice {
        Some(notice) => {
            let class = match notice.level {
                NoticeLevel::Success => "notice notice-success",
                NoticeLevel::Error => "notice notice-error",
            };
            format!(r#"<div class="{}" role="status">{}</div>"#, class, escape(&notice.message))
        }
        None => String::new(),
    }
}

/// Wraps page content in the shared document shell.
pub fn page(title: &str, notice: Option<&Notice>, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | Poet's Canvas</title>
    <style>
        body {{
            font-family: Georgia, 'Times New Roman', serif;
            max-width: 860px;
            margin: 0 auto;
            padding: 20px;
            line-height: 1.6;
            color: #2b2b2b;
            background: #fbf8f1;
        }}
        nav {{
            border-bottom: 2px solid #8b5e3c;
            padding-bottom: 10px;
            margin-bottom: 24px;
        }}
        nav a {{
            margin-right: 16px;
            color: #8b5e3c;
            text-decoration: none;
            font-weight: bold;
        }}
        blockquote {{
            border-left: 4px solid #c9a27e;
            margin: 0 0 8px 0;
            padding-left: 14px;
            font-style: italic;
        }}
        .card {{
            background: #fff;
            border: 1px solid #e4dccf;
            border-radius: 6px;
            padding: 14px 18px;
            margin-bottom: 14px;
        }}
        .meta {{
            color: #777;
            font-size: 14px;
        }}
        .notice {{
            padding: 10px 14px;
            border-radius: 4px;
            margin-bottom: 18px;
        }}
        .notice-success {{
            background: #e6f4e6;
            border: 1px solid #7cb87c;
        }}
        .notice-error {{
            background: #fbe9e9;
            border: 1px solid #d27c7c;
        }}
        .stars {{
            color: #d4a017;
        }}
        form.inline {{
            display: inline;
        }}
        label {{
            display: block;
            margin-top: 12px;
            font-weight: bold;
        }}
        input[type=text], textarea, select {{
            width: 100%;
            padding: 6px;
            box-sizing: border-box;
        }}
        .cover {{
            max-width: 180px;
            border: 1px solid #ccc;
        }}
        .button {{
            display: inline-block;
            padding: 6px 14px;
            margin-top: 12px;
            background: #8b5e3c;
            color: #fff;
            border: none;
            border-radius: 4px;
            text-decoration: none;
            cursor: pointer;
        }}
        .button-danger {{
            background: #b23b3b;
        }}
    </style>
</head>
<body>
    <nav>
        <a href="/">Poet's Canvas</a>
        <a href="/quotes">Quotes</a>
        <a href="/books">Books</a>
    </nav>
    {notice}
    <main>
{content}
    </main>
</body>
</html>"#,
        title = escape(title),
        notice = notice_html(notice),
        content = content,
    )
}

pub fn not_found_page(message: &str) -> String {
    page(
        "Not found",
        None,
        &format!(
            r#"<h1>Page not found</h1>
<p>{}</p>
<p><a href="/">Back to the home page</a></p>"#,
            escape(message)
        ),
    )
}

pub fn error_page(message: &str) -> String {
    page(
        "Error",
        None,
        &format!(
            r#"<h1>Something went wrong</h1>
<p>{}</p>
<p><a href="/">Back to the home page</a></p>"#,
            escape(message)
        ),
    )
}

/// Renders `rating` as filled and empty stars.
pub fn stars(rating: i32) -> String {
    let filled = rating.clamp(0, 5) as usize;
    format!(
        r#"<span class="stars" title="{} out of 5">{}{}</span>"#,
        rating,
        "★".repeat(filled),
        "☆".repeat(5 - filled)
    )
}
