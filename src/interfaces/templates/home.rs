use crate::{
    entities::quote::Quote,
    pages::response::Notice,
    templates::{layout::page, quotes::quote_card},
};

pub fn home_page(recent_quotes: &[Quote], notice: Option<&Notice>) -> String {
    let quotes = if recent_quotes.is_empty() {
        r#"<p>No quotes yet. <a href="/quotes/create">Add the first one.</a></p>"#.to_string()
    } else {
        recent_quotes.iter().map(quote_card).collect::<Vec<_>>().join("\n")
    };

    page(
        "Home",
        notice,
        &format!(
            r#"<h1>Poet's Canvas</h1>
<p>Collect quotes, catalogue books and share reviews.</p>
<p>
    <a class="button" href="/quotes">All quotes</a>
    <a class="button" href="/books">All books</a>
</p>
<h2>Recent quotes</h2>
{quotes}"#
        ),
    )
}
