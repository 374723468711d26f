//! Helpers for integration tests.
#![allow(dead_code)]

use inventory_api::db::{DbPool, establish_connection_pool, run_migrations};
use tempfile::TempDir;

/// Temporary database used in integration tests.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("inventory.db");
        let pool = establish_connection_pool(path.to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        run_migrations(&pool).expect("Migrations failed");
        TestDb { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}
