use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::infrastructure::rate_limit::rate_limit_middleware;
use crate::presentation::config::{CorsSettings, Environment};
use crate::presentation::error::error_verbosity_middleware;
use crate::presentation::handlers::{
    api_info_handler, health_handler, not_found_handler, transcribe_handler,
    vendor_health_handler,
};
use crate::presentation::state::AppState;

/// Room for multipart boundaries and headers on top of the file size limit.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn create_router(state: AppState) -> Router {
    let environment = state.settings.environment;
    let body_limit = state.upload_policy.max_file_size_bytes + MULTIPART_OVERHEAD_BYTES;

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let api = Router::new()
        .route("/api", get(api_info_handler))
        .route(
            "/api/transcribe",
            post(transcribe_handler).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route_layer(middleware::from_fn_with_state(
            state.rate_limiter.clone(),
            rate_limit_middleware,
        ));

    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/health/vendor", get(vendor_health_handler))
        .merge(api)
        .fallback(not_found_handler)
        .layer(middleware::from_fn_with_state(
            environment,
            error_verbosity_middleware,
        ))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors_layer(environment, &state.settings.cors));

    with_security_headers(router).with_state(state)
}

fn cors_layer(environment: Environment, settings: &CorsSettings) -> CorsLayer {
    let origin = if environment.is_production() {
        let origins: Vec<HeaderValue> = settings
            .allowed_origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(origin = %o, error = %e, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    } else {
        AllowOrigin::mirror_request()
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(settings.max_age_secs))
}

fn with_security_headers(router: Router<AppState>) -> Router<AppState> {
    let headers = [
        (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        (header::X_FRAME_OPTIONS, "SAMEORIGIN"),
        (header::REFERRER_POLICY, "no-referrer"),
        (header::X_DNS_PREFETCH_CONTROL, "off"),
    ];

    headers
        .into_iter()
        .fold(router, |router, (name, value): (HeaderName, &'static str)| {
            router.layer(SetResponseHeaderLayer::if_not_present(
                name,
                HeaderValue::from_static(value),
            ))
        })
}
