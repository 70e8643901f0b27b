use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;

use service::vehicle::{DeleteRequest, DeleteStatus, LoadAllSnapshot, SaveRequest};

use crate::errors::ApiError;
use crate::routes::AppState;

#[derive(Serialize, Debug)]
pub struct SaveResponse {
    pub status: &'static str,
    pub message: String,
}

#[derive(Serialize, Debug)]
pub struct DeleteResponse {
    pub status: DeleteStatus,
}

/// `POST /api/save`: persist the body verbatim under its plate key.
pub async fn save(State(state): State<AppState>, body: Bytes) -> Result<Json<SaveResponse>, ApiError> {
    let req = SaveRequest::from_slice(&body)?;
    let path = state.vehicles.save(&req.key, &req.body).await?;
    Ok(Json(SaveResponse { status: "success", message: format!("Saved to {}", path.display()) }))
}

/// `POST /api/delete`: always 200; the outcome is in `status`.
pub async fn delete(State(state): State<AppState>, body: Bytes) -> Result<Json<DeleteResponse>, ApiError> {
    let req = DeleteRequest::from_slice(&body)?;
    let status = state.vehicles.delete(&req.key).await?;
    Ok(Json(DeleteResponse { status }))
}

/// `GET /api/load-all`
pub async fn load_all(State(state): State<AppState>) -> Result<Json<LoadAllSnapshot>, ApiError> {
    Ok(Json(state.vehicles.load_all().await?))
}
