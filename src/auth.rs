use anyhow::anyhow;

use crate::{
    error::{AppError, AppResult},
    models::squads::SquadListRequest,
};

// Static shared secret expected in every request body.
const EXPECTED_KEY: &str = "JWT";
const EXPECTED_SECRET: &str = "DOPAMINE";
const SQUAD_LIST_API_NAME: &str = "getSquadList";

pub fn verify_squad_list_credentials(request: &SquadListRequest) -> AppResult<()> {
    if request.key != EXPECTED_KEY
        || request.secret != EXPECTED_SECRET
        || request.api_name != SQUAD_LIST_API_NAME
    {
        return Err(AppError::BadRequest(anyhow!("Invalid request")));
    }
    Ok(())
}
