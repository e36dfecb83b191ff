use anyhow::anyhow;
use axum::{body::Bytes, extract::State, response::IntoResponse, Json};

use crate::{
    app_state::AppState,
    auth::verify_squad_list_credentials,
    error::{AppError, AppResult},
    models::squads::{SquadListRequest, SquadListResponse},
    queries::squads::get_squads_by_member_id,
};

// Takes raw bytes: any Content-Type is decoded as JSON.
pub async fn get_squad_list(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let payload = SquadListRequest::from_body(&body)
        .map_err(|e| AppError::BadRequest(anyhow!(e)))?;

    if let Err(e) = verify_squad_list_credentials(&payload) {
        tracing::warn!(api_name = %payload.api_name, "rejected squad list request");
        return Err(e);
    }

    let mut conn = state.db_pool.acquire().await?;

    let squads = get_squads_by_member_id(&mut conn, payload.user_id).await?;
    tracing::debug!(user_id = payload.user_id, count = squads.len(), "squad list");

    Ok((
        axum::http::StatusCode::OK,
        Json(SquadListResponse::new(squads)),
    ))
}
