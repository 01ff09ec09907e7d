use crate::adapters::inbound::http::{error::ApiError, extractors::AppJson, state::AppState};
use crate::application::use_cases::ManageSbomsUseCase;
use crate::sbom_catalog::domain::Sbom;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

pub async fn list_sboms(State(state): State<AppState>) -> Json<Vec<Sbom>> {
    Json(state.sboms.list())
}

pub async fn get_sbom(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Sbom>, ApiError> {
    let id = ManageSbomsUseCase::parse_id(&id)?;
    Ok(Json(state.sboms.get(id)?))
}

pub async fn create_sbom(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Value>,
) -> Result<(StatusCode, Json<Sbom>), ApiError> {
    let sbom = state.sboms.create(&payload)?;
    Ok((StatusCode::CREATED, Json(sbom)))
}

pub async fn update_sbom(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<Value>,
) -> Result<Json<Sbom>, ApiError> {
    let id = ManageSbomsUseCase::parse_id(&id)?;
    Ok(Json(state.sboms.update(id, &payload)?))
}

pub async fn delete_sbom(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = ManageSbomsUseCase::parse_id(&id)?;
    state.sboms.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
