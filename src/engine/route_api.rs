use async_trait::async_trait;

use super::Engine;
use crate::{
    api::RoutePlanAPI,
    entities::{RoutePlan, TravelMode},
    error::Error,
};

#[async_trait]
impl RoutePlanAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn find_route_plan(&self) -> Result<RoutePlan, Error> {
        self.load_route_plan().await
    }

    #[tracing::instrument(skip(self))]
    async fn confirm_route(&self) -> Result<RoutePlan, Error> {
        let locations = self.load_locations().await?;

        let plan = RoutePlan::confirm(&locations);
        self.store_route_plan(&plan).await?;

        // a fresh confirmation always starts from a clean board
        self.discard_durations().await;

        Ok(plan)
    }

    #[tracing::instrument(skip(self))]
    async fn set_segment_mode(
        &self,
        from_id: String,
        to_id: String,
        mode: TravelMode,
    ) -> Result<RoutePlan, Error> {
        let mut plan = self.load_route_plan().await?;

        plan.set_mode(&from_id, &to_id, mode)?;
        self.store_route_plan(&plan).await?;

        // durations for the old mode are stale now; the confirmation flag
        // itself is untouched
        self.discard_durations().await;

        Ok(plan)
    }
}
