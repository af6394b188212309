// src/routes.rs

use axum::{
    Json, Router,
    http::Method,
    middleware,
    routing::{get, post, put},
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, exams, sessions, stats, subscriptions, users},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, users, exams, sessions, stats,
///   subscriptions).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (repositories, session store, config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        // Protected profile route
        .merge(
            Router::new().route("/profile", get(auth::profile)).layer(
                middleware::from_fn_with_state(state.clone(), auth_middleware),
            ),
        );

    let user_routes = Router::new()
        .route("/", get(users::list_users))
        .route(
            "/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let exam_routes = Router::new()
        .route("/", get(exams::list_exams))
        .route("/{id}", get(exams::get_exam))
        // Taking an exam requires a logged-in user
        .merge(
            Router::new()
                .route("/{id}/iniciar", post(exams::start_exam))
                .route("/{id}/submeter", post(exams::submit_exam))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    let session_routes = Router::new()
        .route(
            "/",
            get(sessions::current_session).delete(sessions::clear_session),
        )
        .route("/resposta", put(sessions::select_answer))
        .route("/navegacao", put(sessions::navigate))
        .route("/finalizar", post(sessions::finish_session))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let stats_routes = Router::new()
        .route("/me", get(stats::all_stats))
        .route("/me/geral", get(stats::overall_stats))
        .route("/me/materias", get(stats::subject_stats))
        .route("/me/historico", get(stats::history))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let subscription_routes = Router::new()
        .route("/planos", get(subscriptions::list_plans))
        .route("/planos/{id}", get(subscriptions::get_plan))
        .merge(
            Router::new()
                .route("/", post(subscriptions::create_subscription))
                .route(
                    "/me",
                    get(subscriptions::my_subscription)
                        .delete(subscriptions::cancel_subscription),
                )
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    Router::new()
        .route("/", get(root))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/simulados", exam_routes)
        .nest("/api/sessao", session_routes)
        .nest("/api/estatisticas", stats_routes)
        .nest("/api/assinaturas", subscription_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Liveness probe.
async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Concurseiro API is running" }))
}
