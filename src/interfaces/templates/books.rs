use crate::{
    entities::book::{BookPatch, BookResponse},
    pages::response::Notice,
    templates::{
        layout::{escape, escape_opt, page},
        reviews::review_card,
    },
};

fn cover_img(book: &BookResponse) -> String {
    match book.cover_image_url.as_deref() {
        Some(url) => format!(
            r#"<img class="cover" src="{}" alt="Cover of {}">"#,
            escape(url),
            escape(&book.title)
        ),
        None => String::new(),
    }
}

pub fn list_page(books: &[BookResponse], notice: Option<&Notice>) -> String {
    let items = if books.is_empty() {
        "<p>No books yet.</p>".to_string()
    } else {
        books
            .iter()
            .map(|book| {
                format!(
                    r#"<div class="card">
    {cover}
    <h3><a href="/books/{id}">{title}</a></h3>
    <div class="meta">by {author} &middot; {count} review(s)</div>
</div>"#,
                    cover = cover_img(book),
                    id = book.id,
                    title = escape(&book.title),
                    author = escape(&book.author),
                    count = book.reviews.len(),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    page(
        "Books",
        notice,
        &format!(
            r#"<h1>Books</h1>
<a class="button" href="/books/create">Add a book</a>
{items}"#
        ),
    )
}

pub fn detail_page(book: &BookResponse, notice: Option<&Notice>) -> String {
    let reviews = if book.reviews.is_empty() {
        "<p>No reviews yet.</p>".to_string()
    } else {
        book.reviews.iter().map(review_card).collect::<Vec<_>>().join("\n")
    };

    page(
        &book.title,
        notice,
        &format!(
            r#"<div class="card">
    {cover}
    <h1>{title}</h1>
    <div class="meta">by {author}</div>
</div>
<a class="button" href="/books/{id}/edit">Edit</a>
<form class="inline" method="post" action="/books/{id}/delete">
    <button class="button button-danger" type="submit">Delete</button>
</form>
<h2>Reviews</h2>
<a class="button" href="/books/{id}/reviews/create">Write a review</a>
{reviews}
<p><a href="/books">Back to books</a></p>"#,
            cover = cover_img(book),
            title = escape(&book.title),
            author = escape(&book.author),
            id = book.id,
            reviews = reviews,
        ),
    )
}

/// Create and edit form. `current_cover` is shown on edit; leaving the file
/// input empty keeps it.
pub fn form_page(
    heading: &str,
    action: &str,
    form: &BookPatch,
    current_cover: Option<&str>,
    notice: Option<&Notice>,
) -> String {
    let cover = match current_cover {
        Some(url) => format!(
            r#"<p class="meta">Current cover:</p><img class="cover" src="{}" alt="Current cover">"#,
            escape(url)
        ),
        None => String::new(),
    };

    page(
        heading,
        notice,
        &format!(
            r#"<h1>{heading}</h1>
<form method="post" action="{action}" enctype="multipart/form-data">
    <label for="title">Title</label>
    <input type="text" id="title" name="title" maxlength="255" value="{title}" required>
    <label for="author">Author</label>
    <input type="text" id="author" name="author" maxlength="255" value="{author}" required>
    <label for="cover_image">Cover image (optional)</label>
    {cover}
    <input type="file" id="cover_image" name="cover_image" accept="image/*">
    <button class="button" type="submit">Save</button>
</form>
<p><a href="/books">Cancel</a></p>"#,
            heading = escape(heading),
            action = escape(action),
            title = escape_opt(form.title.as_deref()),
            author = escape_opt(form.author.as_deref()),
            cover = cover,
        ),
    )
}
