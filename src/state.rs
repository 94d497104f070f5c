use std::sync::Arc;

use anyhow::Context;

use crate::auth::{
    memory::MemoryUserStore,
    password::Passwords,
    repo::{PgUserStore, UserStore},
};
use crate::config::{AppConfig, HashingConfig};
use crate::db;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub passwords: Passwords,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Connect to Postgres, make sure the users table exists, build the hasher.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let passwords = Passwords::new(config.hashing).context("build password hasher")?;

        let db = db::connect(&config.database).await?;
        db::ensure_schema(&db).await?;

        let store = Arc::new(PgUserStore::new(db)) as Arc<dyn UserStore>;
        Ok(Self::from_parts(store, passwords, Arc::new(config)))
    }

    pub fn from_parts(
        store: Arc<dyn UserStore>,
        passwords: Passwords,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            store,
            passwords,
            config,
        }
    }

    /// In-memory store and cheap hashing; no database needed.
    pub fn fake() -> Self {
        Self::fake_with_store(Arc::new(MemoryUserStore::new()))
    }

    pub fn fake_with_store(store: Arc<dyn UserStore>) -> Self {
        let hashing = HashingConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        };
        let mut config = AppConfig::from_lookup(|_| None).expect("defaults parse");
        config.hashing = hashing;

        let passwords = Passwords::new(hashing).expect("cheap argon2 params ok");
        Self::from_parts(store, passwords, Arc::new(config))
    }
}
