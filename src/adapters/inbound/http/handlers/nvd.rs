use crate::adapters::inbound::http::{error::ApiError, state::AppState};
use crate::application::dto::{CpeQuery, SearchQuery, VersionInfo};
use crate::sbom_catalog::domain::{ComponentSuggestion, Vulnerability};
use axum::{
    extract::{Query, State},
    Json,
};

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ComponentSuggestion>>, ApiError> {
    let suggestions = state.nvd.search(query.keyword.as_deref()).await?;
    Ok(Json(suggestions))
}

pub async fn versions(
    State(state): State<AppState>,
    Query(query): Query<CpeQuery>,
) -> Result<Json<Vec<VersionInfo>>, ApiError> {
    let versions = state.nvd.versions(query.cpe.as_deref()).await?;
    Ok(Json(versions))
}

pub async fn vulnerabilities(
    State(state): State<AppState>,
    Query(query): Query<CpeQuery>,
) -> Result<Json<Vec<Vulnerability>>, ApiError> {
    let vulnerabilities = state.nvd.vulnerabilities(query.cpe.as_deref()).await?;
    Ok(Json(vulnerabilities))
}
