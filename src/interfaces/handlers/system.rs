use std::time::Duration;

use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use humantime::format_duration;
use serde::Serialize;
use tracing::instrument;

use crate::{constants::START_TIME, db::postgres::check_connection, use_cases::extractors::RequestBaseUrl, AppState};

#[derive(Serialize)]
struct HealthCheckResponse {
    status: &'static str,
    uptime: String,
    timestamp: String,
    start_at: String,
    version: &'static str,
    database: &'static str,
    cpu_count: usize,
}

#[instrument(skip(state))]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let now_utc = Utc::now();
    let uptime = now_utc.signed_duration_since(*START_TIME);
    let human_uptime = format_duration(Duration::from_secs(uptime.num_seconds().max(0) as u64));

    let database = match check_connection(&state.db_pool).await {
        Ok(_) => "OK",
        Err(e) => {
            tracing::warn!("Database health check failed: {}", e);
            "Unavailable"
        }
    };

    let response = HealthCheckResponse {
        status: if database == "OK" { "healthy" } else { "degraded" },
        uptime: human_uptime.to_string(),
        timestamp: now_utc.to_rfc3339(),
        start_at: START_TIME.to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
        database,
        cpu_count: num_cpus::get(),
    };

    if database == "OK" {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// Lists the API resources as absolute URLs.
#[instrument(skip(base_url))]
pub async fn api_root(base_url: RequestBaseUrl) -> impl Responder {
    let link = |path: &str| match base_url.url() {
        Some(base) => base.join(path).map(|u| u.to_string()).unwrap_or_else(|_| path.to_string()),
        None => path.to_string(),
    };

    HttpResponse::Ok().json(serde_json::json!({
        "quotes": link("/api/quotes"),
        "books": link("/api/books"),
        "reviews": link("/api/reviews"),
        "reporting-quote-counts": link("/api/reporting-quote-counts"),
    }))
}
