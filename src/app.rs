use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/session", get(handlers::get_session))
        .route("/api/signup", post(handlers::signup))
        .route("/api/login", post(handlers::login))
        .route("/api/logout", post(handlers::logout))
        .route("/api/view", get(handlers::get_view))
        .route("/api/year", post(handlers::select_year))
        .route("/api/day", post(handlers::select_day))
        .route("/api/entry", post(handlers::submit_entry))
        .route("/api/entry/confirm", post(handlers::confirm_entry))
        .route("/api/entry/cancel", post(handlers::cancel_entry))
        .with_state(state)
}
