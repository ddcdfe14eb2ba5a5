mod duration_api;
mod helpers;
mod location_api;
mod place_api;
mod route_api;

use std::sync::atomic::{AtomicU64, Ordering};

use sqlx::{Executor, Pool, Postgres};
use tokio::sync::RwLock;

use crate::{api::API, entities::DurationBoard, error::Error};

type Database = Postgres;

#[derive(Debug)]
pub struct Engine {
    pool: Pool<Database>,
    /// Duration results of the most recent pass, owned exclusively here.
    board: RwLock<DurationBoard>,
    /// Monotonic tag for duration passes. A pass publishes its board only
    /// while its generation is still current, so slow stale passes cannot
    /// clobber fresher state.
    generation: AtomicU64,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub async fn new(pool: Pool<Database>) -> Result<Self, Error> {
        // trip state (KV store)
        pool.execute(
            "CREATE TABLE IF NOT EXISTS trip_state (key VARCHAR PRIMARY KEY, data JSONB NOT NULL)",
        )
        .await?;

        let engine = Self {
            pool,
            board: RwLock::new(DurationBoard::default()),
            generation: AtomicU64::new(0),
        };

        // a new session keeps the visited list but forgets any confirmed route
        engine.reset_route_state().await?;

        Ok(engine)
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl API for Engine {}
