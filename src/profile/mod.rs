use axum::Router;

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod services;

pub fn router() -> Router<AppState> {
    handlers::profile_routes()
}
