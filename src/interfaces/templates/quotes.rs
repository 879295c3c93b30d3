use crate::{
    entities::quote::{Quote, QuoteForm},
    pages::response::Notice,
    templates::layout::{escape, escape_opt, page},
};

/// A quote as a card with its author, era and a link to the detail page.
pub fn quote_card(quote: &Quote) -> String {
    let era = quote
        .era
        .as_deref()
        .map(|era| format!(" &middot; {}", escape(era)))
        .unwrap_or_default();

    format!(
        r#"<div class="card">
    <blockquote>{text}</blockquote>
    <div class="meta">&mdash; {author}{era} &middot; {date}</div>
    <a href="/quotes/{id}">View</a>
</div>"#,
        text = escape(&quote.text),
        author = escape(&quote.author),
        era = era,
        date = quote.date_created.format("%B %-d, %Y"),
        id = quote.id,
    )
}

pub fn list_page(quotes: &[Quote], notice: Option<&Notice>) -> String {
    let items = if quotes.is_empty() {
        "<p>No quotes yet.</p>".to_string()
    } else {
        quotes.iter().map(quote_card).collect::<Vec<_>>().join("\n")
    };

    page(
        "Quotes",
        notice,
        &format!(
            r#"<h1>Quotes</h1>
<a class="button" href="/quotes/create">Add a quote</a>
{items}"#
        ),
    )
}

pub fn detail_page(quote: &Quote, notice: Option<&Notice>) -> String {
    let bio = match quote.author_bio_summary.as_deref() {
        Some(summary) => format!(r#"<h2>About {}</h2><p>{}</p>"#, escape(&quote.author), escape(summary)),
        None => "<p class=\"meta\">No author biography yet.</p>".to_string(),
    };

    page(
        "Quote",
        notice,
        &format!(
            r#"<div class="card">
    <blockquote>{text}</blockquote>
    <div class="meta">&mdash; {author}</div>
    <div class="meta">Era: {era}</div>
    <div class="meta">Added {date}</div>
</div>
{bio}
<form class="inline" method="post" action="/quotes/{id}/fetch-bio">
    <button class="button" type="submit">Fetch author bio</button>
</form>
<a class="button" href="/quotes/{id}/edit">Edit</a>
<form class="inline" method="post" action="/quotes/{id}/delete">
    <button class="button button-danger" type="submit">Delete</button>
</form>
<p><a href="/quotes">Back to quotes</a></p>"#,
            text = escape(&quote.text),
            author = escape(&quote.author),
            era = quote.era.as_deref().map(escape).unwrap_or_else(|| "Unclassified".to_string()),
            date = quote.date_created.format("%B %-d, %Y %H:%M"),
            bio = bio,
            id = quote.id,
        ),
    )
}

/// Create and edit form; `action` is the URL the form posts to.
pub fn form_page(heading: &str, action: &str, form: &QuoteForm, notice: Option<&Notice>) -> String {
    page(
        heading,
        notice,
        &format!(
            r#"<h1>{heading}</h1>
<form method="post" action="{action}">
    <label for="text">Quote</label>
    <textarea id="text" name="text" rows="4" required>{text}</textarea>
    <label for="author">Author</label>
    <input type="text" id="author" name="author" maxlength="100" value="{author}" required>
    <label for="era">Era (optional)</label>
    <input type="text" id="era" name="era" maxlength="50" value="{era}">
    <button class="button" type="submit">Save</button>
</form>
<p><a href="/quotes">Cancel</a></p>"#,
            heading = escape(heading),
            action = escape(action),
            text = escape_opt(form.text.as_deref()),
            author = escape_opt(form.author.as_deref()),
            era = escape_opt(form.era.as_deref()),
        ),
    )
}
