use std::sync::Arc;

use sqlx::SqlitePool;

use crate::db::{Gateway, SqliteGateway};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub gateway: Arc<dyn Gateway>,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        let gateway = Arc::new(SqliteGateway::new(db.clone()));
        Self { db, gateway }
    }
}
