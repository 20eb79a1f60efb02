use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir};
use crate::config::Config;
use crate::handlers;
use crate::middleware::route_guard;
use crate::services::ApiClient;

pub fn build_router(api: ApiClient, config: Config) -> Router {
    let max_body_size = config.server.max_body_size;
    let state = (api, config);

    Router::new()
        // Auth routes
        .route("/", get(handlers::serve_login_page))
        .route("/login", post(handlers::handle_login))
        .route("/sign-up", get(handlers::serve_sign_up_page))
        .route("/register", post(handlers::handle_register))
        .route("/logout", get(handlers::handle_logout))
        .route("/accessDenied", get(handlers::serve_access_denied))

        // Dashboard routes
        .route("/dashboard", get(handlers::serve_dashboard))
        .route("/dashboard/:page", get(handlers::serve_entity_page))
        .route("/dashboard/:page/create", post(handlers::create_entity))
        .route("/dashboard/:page/update", post(handlers::update_entity))
        .route("/dashboard/:page/delete", post(handlers::delete_entity))

        // Static files
        .nest_service("/static", ServeDir::new("static"))

        .layer(from_fn_with_state(state.clone(), route_guard))
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .with_state(state)
}
