use sqlx::{PgPool, Pool, Postgres, Transaction, postgres::PgPoolOptions};
use std::sync::Arc;

use crate::{
    conf::settings,
    pkg::internal::store::{JobStore, PgJobStore},
    prelude::Result,
};

pub fn db_pool() -> Result<Pool<Postgres>> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.database_pool_max_connections)
        .connect_lazy(&settings.database_url)?;
    Ok(pool)
}

#[async_trait::async_trait]
pub trait GetTxn {
    async fn begin_txn(&self) -> Result<Transaction<'static, Postgres>>;
}

#[async_trait::async_trait]
impl GetTxn for PgPool {
    async fn begin_txn(&self) -> Result<Transaction<'static, Postgres>> {
        Ok(self.begin().await?)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: Arc<PgPool>,
    pub jobs: Arc<dyn JobStore>,
}

impl AppState {
    pub async fn new() -> Result<AppState> {
        Ok(AppState::from_pool(db_pool()?))
    }

    pub fn from_pool(pool: PgPool) -> AppState {
        let db_pool = Arc::new(pool);
        AppState {
            jobs: Arc::new(PgJobStore::new(db_pool.clone())),
            db_pool,
        }
    }
}
