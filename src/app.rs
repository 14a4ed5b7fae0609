// Application state shared across handlers
use std::sync::Arc;

use crate::{db::DieselPool, services::JwtService};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: DieselPool,
    pub jwt_service: Arc<JwtService>,
}
