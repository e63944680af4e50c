use crate::{
    config::StoreConfig,
    error::EstudiantesResult,
    store::{MemoryStudentStore, PostgresStudentStore, StudentStore},
};
use sqlx::postgres::PgPoolOptions;
use std::{ops::Deref, sync::Arc};

#[derive(Clone, Debug)]
pub struct EstudiantesState {
    store: Arc<dyn StudentStore>,
}

impl EstudiantesState {
    pub async fn new(options: PgPoolOptions, config: StoreConfig) -> EstudiantesResult<Self> {
        let store: Arc<dyn StudentStore> = match config {
            StoreConfig::Postgres(db_config) => {
                Arc::new(PostgresStudentStore::new(options, &db_config).await?)
            }
            StoreConfig::Memory => {
                warn!("Using the in-memory store, students will not outlive this process");
                Arc::new(MemoryStudentStore::new())
            }
        };

        Ok(Self::with_store(store))
    }

    pub fn with_store(store: Arc<dyn StudentStore>) -> Self {
        Self { store }
    }

    pub async fn sensible_shutdown(&self) {
        self.store.close().await;
    }
}

impl Deref for EstudiantesState {
    type Target = dyn StudentStore;

    fn deref(&self) -> &Self::Target {
        self.store.as_ref()
    }
}
