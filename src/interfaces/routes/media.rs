use actix_multipart::form::MultipartFormConfig;
use actix_web::web;

use crate::{handlers::media, settings::AppConfig};

/// Serves stored uploads below `media_url` (e.g. `/media/`) and caps
/// multipart bodies at the configured upload size.
pub fn config_routes(cfg: &mut web::ServiceConfig, config: &AppConfig) {
    cfg.app_data(
        MultipartFormConfig::default().total_limit(config.multipart_limit()),
    );

    cfg.service(
        web::resource(format!("{}{{path:.*}}", config.media_url))
            .route(web::get().to(media::serve_media))
    );
}
