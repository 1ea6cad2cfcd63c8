use axum::{
    http::{header, HeaderValue},
    middleware,
    response::{IntoResponse, Response},
    routing, Router,
};
use std::{any::Any, sync::Arc};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer, compression::CompressionLayer,
    set_header::SetResponseHeaderLayer,
};

use axum_web::{context, erring::HTTPError};

use crate::api;
use crate::conf;
use crate::content::{ContentService, Normalizer};

pub fn new(cfg: conf::Conf) -> (Arc<api::AppState>, Router) {
    let content = ContentService::new(
        cfg.content.base_dir,
        Normalizer::new(cfg.content.body_format),
    );
    let app_state = Arc::new(api::AppState {
        start_at: context::unix_ms(),
        content: Arc::new(content),
    });

    let mds = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(context::middleware))
        .layer(CompressionLayer::new());

    let content_routes = routing::get(api::content::get)
        .post(api::content::get)
        .options(api::content::preflight);

    let app = Router::new()
        .route("/", routing::get(api::version))
        .route("/healthz", routing::get(api::healthz))
        .route("/.netlify/functions/get-content", content_routes.clone())
        .route("/v1/content", content_routes)
        .layer(mds)
        .with_state(app_state.clone());

    (app_state, app)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    HTTPError::internal(details).into_response()
}
