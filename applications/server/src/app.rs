/// Router assembly
use crate::{api, config::ServerSettings, error::Result, middleware, state::AppState};
use axum::{
    handler::HandlerWithoutStateExt,
    http::{header, Method},
    middleware as axum_middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// CORS policy: only the configured origins may call the API
pub fn cors_layer(settings: &ServerSettings) -> Result<CorsLayer> {
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(settings.cors_origins()?))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}

/// Build the full application router
pub fn create_router(app_state: AppState, settings: &ServerSettings) -> Result<Router> {
    // A known path with an unsupported method is answered like an unknown route
    let routes = Router::new()
        .route("/", get(api::info::info).fallback(api::info::not_found))
        .route("/health", get(api::health::health).fallback(api::info::not_found))
        .route(
            "/users",
            get(api::users::list_users)
                .post(api::users::create_user)
                .fallback(api::info::not_found),
        )
        .route(
            "/users/:id",
            get(api::users::get_user)
                .put(api::users::update_user)
                .delete(api::users::delete_user)
                .fallback(api::info::not_found),
        );

    // Static web UI; anything it does not have falls through to the JSON 404
    let routes = match settings.web_dir.as_ref().filter(|dir| dir.is_dir()) {
        Some(web_dir) => {
            tracing::info!("Serving web UI from {}", web_dir.display());
            let serve_dir = ServeDir::new(web_dir)
                .call_fallback_on_method_not_allowed(true)
                .not_found_service(api::info::not_found.into_service());
            routes.fallback_service(serve_dir)
        }
        None => routes.fallback(api::info::not_found),
    };

    Ok(routes
        .layer(axum_middleware::from_fn_with_state(
            app_state.environment,
            middleware::expose_error_detail,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(settings)?)
        .with_state(app_state))
}
