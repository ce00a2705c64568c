use crate::controller::View;
use crate::errors::AppError;
use crate::models::{
    EntryFormRequest, LoginRequest, SelectDayRequest, SelectYearRequest, SessionResponse,
    SignupRequest,
};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{extract::State, response::Html, Json};

pub async fn index() -> Html<String> {
    Html(render_index())
}

pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(state.controller.session().await)
}

pub async fn get_view(State(state): State<AppState>) -> Result<Json<View>, AppError> {
    current_view(&state).await
}

pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<View>, AppError> {
    state.controller.signup(payload).await?;
    current_view(&state).await
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<View>, AppError> {
    state.controller.login(payload).await?;
    current_view(&state).await
}

pub async fn logout(State(state): State<AppState>) -> Result<Json<View>, AppError> {
    state.controller.logout().await;
    current_view(&state).await
}

pub async fn select_year(
    State(state): State<AppState>,
    Json(payload): Json<SelectYearRequest>,
) -> Result<Json<View>, AppError> {
    state.controller.select_year(payload.year).await?;
    current_view(&state).await
}

pub async fn select_day(
    State(state): State<AppState>,
    Json(payload): Json<SelectDayRequest>,
) -> Result<Json<View>, AppError> {
    state.controller.select_day(&payload.date).await?;
    current_view(&state).await
}

pub async fn submit_entry(
    State(state): State<AppState>,
    Json(payload): Json<EntryFormRequest>,
) -> Result<Json<View>, AppError> {
    state
        .controller
        .submit(payload.is_sick, payload.severity)
        .await?;
    current_view(&state).await
}

pub async fn confirm_entry(State(state): State<AppState>) -> Result<Json<View>, AppError> {
    state.controller.confirm().await?;
    current_view(&state).await
}

pub async fn cancel_entry(State(state): State<AppState>) -> Result<Json<View>, AppError> {
    state.controller.cancel().await?;
    current_view(&state).await
}

async fn current_view(state: &AppState) -> Result<Json<View>, AppError> {
    Ok(Json(state.controller.view().await?))
}
