pub mod health;
pub mod rates;

use std::{any::Any, sync::Arc};

use axum::{
    error_handling::HandleErrorLayer,
    http::HeaderValue,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    BoxError, Json, Router,
};
use tower::{timeout::error::Elapsed, timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    cache::cache_responses,
    config::Config,
    error::ApiError,
    main_lib::AppState,
    models::{CurrencyListResponse, RateRecord, RateResponse, SupportedCurrency},
};

#[derive(OpenApi)]
#[openapi(
    paths(rates::get_rate, rates::list_currencies, health::healthz, health::readyz),
    components(schemas(RateResponse, RateRecord, CurrencyListResponse, SupportedCurrency)),
    tags((name = "boc-rate"))
)]
pub struct ApiDoc;

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::Internal(format!("handler panicked: {}", detail)).into_response()
}

async fn handle_timeout(err: BoxError) -> Response {
    let detail = if err.is::<Elapsed>() {
        "request deadline elapsed".to_string()
    } else {
        format!("unhandled middleware error: {}", err)
    };
    ApiError::Internal(detail).into_response()
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(AnyOrigin)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", o);
                    None
                }
            })
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };

    let openapi = ApiDoc::openapi();

    let rates = rates::rate_router().route_layer(middleware::from_fn_with_state(
        state.cache.clone(),
        cache_responses,
    ));

    let api = Router::new().merge(health::router()).merge(rates::router());

    Router::new()
        .merge(rates)
        .nest("/api/v1", api)
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout))
                .layer(TimeoutLayer::new(config.request_timeout)),
        )
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
}
