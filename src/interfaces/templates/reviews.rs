use crate::{
    entities::{
        book::BookResponse,
        review::{Review, ReviewForm, MAX_RATING, MIN_RATING},
    },
    pages::response::Notice,
    templates::layout::{escape, escape_opt, page, stars},
};

/// A review with its edit and delete actions.
pub fn review_card(review: &Review) -> String {
    format!(
        r#"<div class="card">
    {stars} <strong>{name}</strong>
    <div class="meta">{date}</div>
    <p>{body}</p>
    <a href="/reviews/{id}/edit">Edit</a>
    <form class="inline" method="post" action="/reviews/{id}/delete">
        <button class="button button-danger" type="submit">Delete</button>
    </form>
</div>"#,
        stars = stars(review.rating),
        name = escape(&review.reviewer_name),
        date = review.created_at.format("%B %-d, %Y"),
        body = escape(&review.body),
        id = review.id,
    )
}

fn rating_options(selected: Option<&str>) -> String {
    (MIN_RATING..=MAX_RATING)
        .rev()
        .map(|value| {
            let value = value.to_string();
            let attr = if selected.map(str::trim) == Some(value.as_str()) { " selected" } else { "" };
            format!(r#"<option value="{value}"{attr}>{value}</option>"#)
        })
        .collect::<Vec<_>>()
        .join("")
}

pub fn form_page(
    heading: &str,
    action: &str,
    book: &BookResponse,
    form: &ReviewForm,
    notice: Option<&Notice>,
) -> String {
    page(
        heading,
        notice,
        &format!(
            r#"<h1>{heading}</h1>
<p class="meta">for <a href="/books/{book_id}">{book_title}</a> by {book_author}</p>
<form method="post" action="{action}">
    <label for="reviewer_name">Your name</label>
    <input type="text" id="reviewer_name" name="reviewer_name" maxlength="100" value="{name}" required>
    <label for="rating">Rating</label>
    <select id="rating" name="rating" required>
        <option value="">Choose a rating</option>
        {options}
    </select>
    <label for="body">Review</label>
    <textarea id="body" name="body" rows="6" required>{body}</textarea>
    <button class="button" type="submit">Save</button>
</form>
<p><a href="/books/{book_id}">Cancel</a></p>"#,
            heading = escape(heading),
            book_id = book.id,
            book_title = escape(&book.title),
            book_author = escape(&book.author),
            action = escape(action),
            name = escape_opt(form.reviewer_name.as_deref()),
            options = rating_options(form.rating.as_deref()),
            body = escape_opt(form.body.as_deref()),
        ),
    )
}
