use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use url::Url;

use crate::AppState;

/// Base URL used to turn stored media paths into absolute URLs.
///
/// Prefers the configured public base URL and falls back to the scheme and
/// host of the incoming request. Never fails; `None` means relative URLs.
#[derive(Debug, Clone)]
pub struct RequestBaseUrl(pub Option<Url>);

impl RequestBaseUrl {
    pub fn url(&self) -> Option<&Url> {
        self.0.as_ref()
    }
}

impl FromRequest for RequestBaseUrl {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let configured = req
            .app_data::<web::Data<AppState>>()
            .and_then(|state| state.public_base_url.clone());

        let base = configured.or_else(|| {
            let info = req.connection_info();
            Url::parse(&format!("{}://{}/", info.scheme(), info.host())).ok()
        });

        ready(Ok(RequestBaseUrl(base)))
    }
}
