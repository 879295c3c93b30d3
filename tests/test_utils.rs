#![allow(dead_code)]

use std::{collections::HashMap, net::TcpListener, path::PathBuf, sync::Arc, time::Duration};

use actix_web::{http::StatusCode, middleware::NormalizePath, web, App, HttpResponse, HttpServer};
use once_cell::sync::Lazy;
use poets_canvas::{
    db::postgres::{create_pool, run_migrations},
    routes::{configure_media, configure_routes},
    settings::{AppConfig, AppEnvironment},
    AppState,
};
use reqwest::Client;
use serde_json::{json, Value};
use sqlx::PgPool;
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

pub const KEATS: &str = "John Keats";
pub const KEATS_SUMMARY: &str = "John Keats was an English poet of the second generation of Romantic poets.";

/// Smallest byte sequence `infer` recognises as a PNG.
pub const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89,
];

/// Upload cap for the app under test, small enough to exceed cheaply.
pub const TEST_MAX_UPLOAD_BYTES: usize = 8 * 1024;

// ───── Fake Wikipedia API ───────────────────────────────────────────

#[derive(Clone)]
pub enum FakeWikipedia {
    /// Answers like the real query API: known titles get an extract, others a missing page.
    Articles(HashMap<String, String>),
    /// Answers every request with this status and body after `delay`.
    Raw {
        status: u16,
        body: String,
        delay: Duration,
    },
}

impl FakeWikipedia {
    pub fn articles(articles: &[(&str, &str)]) -> Self {
        FakeWikipedia::Articles(
            articles
                .iter()
                .map(|(title, extract)| (title.to_string(), extract.to_string()))
                .collect(),
        )
    }

    pub fn raw(status: u16, body: &str) -> Self {
        FakeWikipedia::Raw {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn slow(delay: Duration) -> Self {
        FakeWikipedia::Raw {
            status: 200,
            body: json!({"query": {"pages": {}}}).to_string(),
            delay,
        }
    }

    /// Serves the fake on an ephemeral port and returns its API URL.
    pub fn spawn(self) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind fake Wikipedia");
        let port = listener.local_addr().unwrap().port();
        let behaviour = web::Data::new(self);

        let server = HttpServer::new(move || {
            App::new()
                .app_data(behaviour.clone())
                .route("/w/api.php", web::get().to(fake_query_api))
        })
        .listen(listener)
        .expect("Failed to start fake Wikipedia")
        .workers(1)
        .run();

        tokio::spawn(server);

        format!("http://127.0.0.1:{}/w/api.php", port)
    }
}

async fn fake_query_api(
    behaviour: web::Data<FakeWikipedia>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    match behaviour.get_ref() {
        FakeWikipedia::Articles(articles) => {
            let title = query.get("titles").cloned().unwrap_or_default();
            let body: Value = match articles.get(&title) {
                Some(extract) => json!({
                    "batchcomplete": "",
                    "query": {"pages": {"4242": {
                        "pageid": 4242, "ns": 0, "title": title, "extract": extract
                    }}}
                }),
                None => json!({
                    "batchcomplete": "",
                    "query": {"pages": {"-1": {"ns": 0, "title": title, "missing": ""}}}
                }),
            };
            HttpResponse::Ok().json(body)
        }
        FakeWikipedia::Raw { status, body, delay } => {
            tokio::time::sleep(*delay).await;
            HttpResponse::build(StatusCode::from_u16(*status).unwrap())
                .content_type("application/json")
                .body(body.clone())
        }
    }
}

// ───── Application under test ───────────────────────────────────────

static DB_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub client: Client,
    pub config: AppConfig,
    _db_guard: MutexGuard<'static, ()>,
}

impl TestApp {
    /// Starts the app against `APP_TEST_DATABASE_URL` with empty tables.
    /// Tests using it are `#[ignore]`d; run them with `cargo test -- --ignored`.
    pub async fn spawn() -> Self {
        let database_url = std::env::var("APP_TEST_DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .expect("APP_TEST_DATABASE_URL must point at a PostgreSQL database for this test");

        let db_guard = DB_LOCK.lock().await;

        let bio_api_url = FakeWikipedia::articles(&[(KEATS, KEATS_SUMMARY)]).spawn();
        let config = test_config(database_url, bio_api_url);

        let db_pool = create_pool(&config)
            .await
            .expect("Failed to create test DB pool");

        run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        sqlx::query("TRUNCATE TABLE reviews, books, quotes RESTART IDENTITY CASCADE")
            .execute(&db_pool)
            .await
            .expect("Failed to truncate tables");

        let state = Arc::new(
            AppState::new(&config, db_pool.clone()).expect("Failed to build app state")
        );

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let server_config = config.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::from(state.clone()))
                .wrap(NormalizePath::trim())
                .configure(configure_routes)
                .configure(|cfg| configure_media(cfg, &server_config))
        })
        .listen(listener)
        .expect("Failed to bind server")
        .workers(1)
        .run();

        tokio::spawn(server);

        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        while client.get(format!("{}/api/health", address)).send().await.is_err() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        TestApp {
            address,
            db_pool,
            client,
            config,
            _db_guard: db_guard,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send request")
    }

    pub async fn get_json(&self, path: &str) -> (reqwest::StatusCode, Value) {
        let response = self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send request");
        let status = response.status();
        let body = response.json().await.unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn delete(&self, path: &str) -> reqwest::StatusCode {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send request")
            .status()
    }

    pub async fn create_quote(&self, text: &str, author: &str, era: Option<&str>) -> Value {
        let response = self
            .post_json("/api/quotes", &json!({"text": text, "author": author, "era": era}))
            .await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.unwrap()
    }

    pub async fn create_book(&self, title: &str, author: &str) -> Value {
        let response = self
            .post_json("/api/books", &json!({"title": title, "author": author}))
            .await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.unwrap()
    }

    pub async fn create_review(&self, book_id: i64, reviewer: &str, rating: i32) -> reqwest::Response {
        self.post_json(
            "/api/reviews",
            &json!({"book": book_id, "reviewer_name": reviewer, "rating": rating, "body": "Lovely."}),
        )
        .await
    }

    pub async fn count_rows(&self, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.db_pool)
            .await
            .expect("Failed to count rows")
    }
}

fn test_config(database_url: String, bio_api_url: String) -> AppConfig {
    let media_root: PathBuf = std::env::temp_dir().join(format!("poets_canvas_media_{}", Uuid::new_v4()));

    AppConfig {
        env: AppEnvironment::Testing,
        name: "Poets-Canvas Test".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        worker_count: 1,
        database_url,
        cors_allowed_origins: vec!["*".to_string()],
        media_root: media_root.to_string_lossy().into_owned(),
        bio_api_url,
        bio_timeout_secs: 2,
        max_upload_bytes: TEST_MAX_UPLOAD_BYTES,
        db_max_connections: 5,
        db_connect_retries: 0,
        ..Default::default()
    }
}
