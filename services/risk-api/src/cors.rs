use crate::config::CorsConfig;
use actix_cors::Cors;
use actix_web::http::header;

/// CORS policy for the dashboard frontends
pub fn build_cors(config: &CorsConfig) -> Cors {
    let origins = config.origins();

    let cors = if origins.is_empty() {
        Cors::default().allow_any_origin()
    } else {
        origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(config.max_age)
}
