mod test_utils;

use reqwest::{header::LOCATION, multipart, StatusCode};
use test_utils::*;

fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[actix_rt::test]
#[ignore = "needs a PostgreSQL database in APP_TEST_DATABASE_URL"]
async fn home_page_renders() {
    let app = TestApp::spawn().await;
    app.create_quote("Hope is the thing with feathers", "Emily Dickinson", None).await;

    let response = app.client.get(app.url("/")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.unwrap();
    assert!(html.contains("Recent quotes"));
    assert!(html.contains("/quotes/1"));
}

#[actix_rt::test]
#[ignore = "needs a PostgreSQL database in APP_TEST_DATABASE_URL"]
async fn creating_a_quote_redirects_with_notice() {
    let app = TestApp::spawn().await;

    let response = app.client
        .post(app.url("/quotes/create"))
        .form(&[("text", "So it goes."), ("author", "Kurt Vonnegut"), ("era", "")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/quotes/1?notice=success&message=Quote%20created%20successfully%21"
    );

    let (_, quote) = app.get_json("/api/quotes/1").await;
    assert_eq!(quote["era"], serde_json::Value::Null);

    let detail = app.client.get(app.url(&location(&response))).send().await.unwrap();
    assert_eq!(detail.status(), StatusCode::OK);
    assert!(detail.text().await.unwrap().contains(r#"class="notice notice-success""#));
}

#[actix_rt::test]
#[ignore = "needs a PostgreSQL database in APP_TEST_DATABASE_URL"]
async fn quote_form_with_missing_author_is_rerendered() {
    let app = TestApp::spawn().await;

    let response = app.client
        .post(app.url("/quotes/create"))
        .form(&[("text", "Orphan line"), ("author", "")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = response.text().await.unwrap();
    assert!(html.contains(r#"class="notice notice-error""#));
    assert!(html.contains("<form"));
    assert_eq!(app.count_rows("quotes").await, 0);
}

#[actix_rt::test]
#[ignore = "needs a PostgreSQL database in APP_TEST_DATABASE_URL"]
async fn get_on_delete_url_does_not_delete() {
    let app = TestApp::spawn().await;
    app.create_quote("Still here", "Author", None).await;

    let response = app.client.get(app.url("/quotes/1/delete")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/quotes/1");
    assert_eq!(app.count_rows("quotes").await, 1);

    let response = app.client.post(app.url("/quotes/1/delete")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/quotes?notice=success"));
    assert_eq!(app.count_rows("quotes").await, 0);
}

#[actix_rt::test]
#[ignore = "needs a PostgreSQL database in APP_TEST_DATABASE_URL"]
async fn unknown_quote_renders_404_page() {
    let app = TestApp::spawn().await;

    let response = app.client.get(app.url("/quotes/404")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.text().await.unwrap().contains("Page not found"));
}

#[actix_rt::test]
#[ignore = "needs a PostgreSQL database in APP_TEST_DATABASE_URL"]
async fn failed_bio_fetch_redirects_with_error_notice() {
    let app = TestApp::spawn().await;
    app.create_quote("Words", "Unknown Person", None).await;

    let response = app.client.post(app.url("/quotes/1/fetch-bio")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/quotes/1?notice=error"));

    let (_, quote) = app.get_json("/api/quotes/1").await;
    assert_eq!(quote["author_bio_summary"], serde_json::Value::Null);
}

#[actix_rt::test]
#[ignore = "needs a PostgreSQL database in APP_TEST_DATABASE_URL"]
async fn successful_bio_fetch_redirects_with_success_notice() {
    let app = TestApp::spawn().await;
    app.create_quote("Beauty is truth", KEATS, None).await;

    let response = app.client.post(app.url("/quotes/1/fetch-bio")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/quotes/1?notice=success"));

    let (_, quote) = app.get_json("/api/quotes/1").await;
    assert_eq!(quote["author_bio_summary"], KEATS_SUMMARY);
}

#[actix_rt::test]
#[ignore = "needs a PostgreSQL database in APP_TEST_DATABASE_URL"]
async fn book_form_with_cover_creates_book() {
    let app = TestApp::spawn().await;

    let form = multipart::Form::new()
        .text("title", "Dune")
        .text("author", "Frank Herbert")
        .part(
            "cover_image",
            multipart::Part::bytes(PNG_BYTES.to_vec()).file_name("dune.png").mime_str("image/png").unwrap(),
        );

    let response = app.client.post(app.url("/books/create")).multipart(form).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/books/1?notice=success"));

    let (_, book) = app.get_json("/api/books/1").await;
    assert!(book["cover_image"].as_str().unwrap().starts_with("book_covers/"));
}

#[actix_rt::test]
#[ignore = "needs a PostgreSQL database in APP_TEST_DATABASE_URL"]
async fn oversized_cover_rerenders_book_form() {
    let app = TestApp::spawn().await;

    let mut cover = PNG_BYTES.to_vec();
    cover.resize(app.config.multipart_limit() * 2, 0);
    let form = multipart::Form::new()
        .text("title", "Dune")
        .text("author", "Frank Herbert")
        .part(
            "cover_image",
            multipart::Part::bytes(cover).file_name("dune.png").mime_str("image/png").unwrap(),
        );

    let response = app.client.post(app.url("/books/create")).multipart(form).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .starts_with("text/html"));
    let html = response.text().await.unwrap();
    assert!(html.contains(r#"class="notice notice-error""#));
    assert!(html.contains(&format!("at most {} bytes", TEST_MAX_UPLOAD_BYTES)));
    assert!(html.contains("<form"));
    assert_eq!(app.count_rows("books").await, 0);
}

#[actix_rt::test]
#[ignore = "needs a PostgreSQL database in APP_TEST_DATABASE_URL"]
async fn editing_a_book_without_upload_keeps_cover() {
    let app = TestApp::spawn().await;

    let form = multipart::Form::new()
        .text("title", "Dune")
        .text("author", "Frank Herbert")
        .part(
            "cover_image",
            multipart::Part::bytes(PNG_BYTES.to_vec()).file_name("dune.png").mime_str("image/png").unwrap(),
        );
    app.client.post(app.url("/books/create")).multipart(form).send().await.unwrap();
    let (_, before) = app.get_json("/api/books/1").await;

    let edit = multipart::Form::new()
        .text("title", "Dune Messiah")
        .text("author", "Frank Herbert");
    let response = app.client.post(app.url("/books/1/edit")).multipart(edit).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let (_, after) = app.get_json("/api/books/1").await;
    assert_eq!(after["title"], "Dune Messiah");
    assert_eq!(after["cover_image"], before["cover_image"]);
}

#[actix_rt::test]
#[ignore = "needs a PostgreSQL database in APP_TEST_DATABASE_URL"]
async fn review_form_rejects_non_numeric_rating() {
    let app = TestApp::spawn().await;
    app.create_book("Dune", "Frank Herbert").await;

    let response = app.client
        .post(app.url("/books/1/reviews/create"))
        .form(&[("reviewer_name", "Ada"), ("rating", "abc"), ("body", "Great")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.count_rows("reviews").await, 0);
}

#[actix_rt::test]
#[ignore = "needs a PostgreSQL database in APP_TEST_DATABASE_URL"]
async fn review_form_creates_and_deletes_review() {
    let app = TestApp::spawn().await;
    app.create_book("Dune", "Frank Herbert").await;

    let response = app.client
        .post(app.url("/books/1/reviews/create"))
        .form(&[("reviewer_name", "Ada"), ("rating", "4"), ("body", "Great")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/books/1?notice=success"));
    assert_eq!(app.count_rows("reviews").await, 1);

    let response = app.client.get(app.url("/reviews/1/delete")).send().await.unwrap();
    assert_eq!(location(&response), "/books/1");
    assert_eq!(app.count_rows("reviews").await, 1);

    let response = app.client.post(app.url("/reviews/1/delete")).send().await.unwrap();
    assert!(location(&response).starts_with("/books/1?notice=success"));
    assert_eq!(app.count_rows("reviews").await, 0);
}

#[actix_rt::test]
#[ignore = "needs a PostgreSQL database in APP_TEST_DATABASE_URL"]
async fn user_text_is_escaped_on_pages() {
    let app = TestApp::spawn().await;
    app.create_quote("<script>alert(1)</script>", "Mallory", None).await;

    let html = app.client.get(app.url("/quotes/1")).send().await.unwrap().text().await.unwrap();

    assert!(!html.contains("<script>alert(1)</script>"));
}
