use serde::{de::DeserializeOwned, Serialize};
use sqlx::{types::Json, Executor, Pool, Row};

use super::{Database, Engine};
use crate::{
    entities::{Location, RoutePlan},
    error::Error,
};

pub const LOCATIONS_KEY: &str = "visited_locations";
pub const SEGMENTS_KEY: &str = "route_segments";
pub const CONFIRMED_KEY: &str = "is_route_confirmed";

#[tracing::instrument(skip(pool, value))]
pub async fn store_value<T>(pool: &Pool<Database>, key: &str, value: &T) -> Result<(), Error>
where
    T: Serialize + Sync,
{
    let mut conn = pool.acquire().await?;

    conn.execute(
        sqlx::query(
            "INSERT INTO trip_state (key, data) VALUES ($1, $2) ON CONFLICT (key) DO UPDATE SET data = EXCLUDED.data",
        )
        .bind(key)
        .bind(Json(value)),
    )
    .await?;

    Ok(())
}

#[tracing::instrument(skip(pool))]
pub async fn fetch_value<T>(pool: &Pool<Database>, key: &str) -> Result<Option<T>, Error>
where
    T: DeserializeOwned,
{
    let mut conn = pool.acquire().await?;

    let maybe_result = conn
        .fetch_optional(sqlx::query("SELECT data FROM trip_state WHERE key = $1").bind(key))
        .await?;

    match maybe_result {
        Some(row) => {
            let Json(value): Json<T> = row.try_get("data")?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

impl Engine {
    pub(super) async fn load_locations(&self) -> Result<Vec<Location>, Error> {
        Ok(fetch_value(&self.pool, LOCATIONS_KEY)
            .await?
            .unwrap_or_default())
    }

    pub(super) async fn store_locations(&self, locations: &[Location]) -> Result<(), Error> {
        store_value(&self.pool, LOCATIONS_KEY, &locations).await
    }

    pub(super) async fn load_route_plan(&self) -> Result<RoutePlan, Error> {
        let segments = fetch_value(&self.pool, SEGMENTS_KEY)
            .await?
            .unwrap_or_default();
        let confirmed = fetch_value(&self.pool, CONFIRMED_KEY)
            .await?
            .unwrap_or(false);

        Ok(RoutePlan {
            segments,
            confirmed,
        })
    }

    pub(super) async fn store_route_plan(&self, plan: &RoutePlan) -> Result<(), Error> {
        store_value(&self.pool, SEGMENTS_KEY, &plan.segments).await?;
        store_value(&self.pool, CONFIRMED_KEY, &plan.confirmed).await?;

        Ok(())
    }

    /// Back to the planning state: no segments, not confirmed, no duration
    /// data. The location list itself is untouched.
    pub(super) async fn reset_route_state(&self) -> Result<(), Error> {
        self.store_route_plan(&RoutePlan::default()).await?;
        self.discard_durations().await;

        Ok(())
    }

    /// Invalidate the duration board and retire any in-flight pass.
    pub(super) async fn discard_durations(&self) {
        let generation = self.next_generation();
        let mut board = self.board.write().await;
        board.reset(generation);
    }
}
