use crate::adapters::inbound::http::{error::ApiError, extractors::AppJson, state::AppState};
use crate::application::dto::{NvdKeyRequest, NvdKeyResponse, SettingsResponse};
use axum::{extract::State, Json};

pub async fn get_settings(State(state): State<AppState>) -> Json<SettingsResponse> {
    Json(state.settings.settings())
}

pub async fn update_nvd_key(
    State(state): State<AppState>,
    AppJson(request): AppJson<NvdKeyRequest>,
) -> Result<Json<NvdKeyResponse>, ApiError> {
    let response = state.settings.update_nvd_key(request).await?;
    Ok(Json(response))
}
