//! Shared fixtures for the integration tests: a migrated SQLite file that
//! lives as long as the fixture.

#![allow(dead_code)]

use classmate::db::{DbConnection, DbPool, establish_connection_pool};
use classmate::repository::DieselRepository;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub struct TestDb {
    pool: DbPool,
    // Dropped last so the database file outlives the pool.
    _dir: TempDir,
}

impl TestDb {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("classmate.db");
        let pool = establish_connection_pool(&path.to_string_lossy()).expect("sqlite pool");

        pool.get()
            .expect("sqlite connection")
            .run_pending_migrations(MIGRATIONS)
            .expect("migrations");

        Self { pool, _dir: dir }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn conn(&self) -> DbConnection {
        self.pool.get().expect("sqlite connection")
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}
