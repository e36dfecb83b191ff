use crate::app_state::AppState;
use crate::handlers::squads;
use axum::{routing::post, Router};

pub fn squads_routes() -> Router<AppState> {
    Router::new().route("/squad-list", post(squads::get_squad_list))
}
