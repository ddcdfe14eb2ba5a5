use async_trait::async_trait;

use super::Engine;
use crate::{
    api::LocationAPI,
    entities::{Location, LocationDraft},
    error::{invalid_input_error, Error},
};

#[async_trait]
impl LocationAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn list_locations(&self) -> Result<Vec<Location>, Error> {
        self.load_locations().await
    }

    #[tracing::instrument(skip(self))]
    async fn add_location(&self, draft: LocationDraft) -> Result<Location, Error> {
        let mut locations = self.load_locations().await?;

        let location = Location::new(draft);
        locations.push(location.clone());
        self.store_locations(&locations).await?;

        // any edit to the list un-confirms the route
        self.reset_route_state().await?;

        Ok(location)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_location(&self, id: String) -> Result<Vec<Location>, Error> {
        let mut locations = self.load_locations().await?;

        let before = locations.len();
        locations.retain(|location| location.id != id);
        if locations.len() == before {
            return Err(invalid_input_error());
        }

        self.store_locations(&locations).await?;

        // drop only the segments touching the deleted location, then
        // un-confirm
        let mut plan = self.load_route_plan().await?;
        plan.prune_location(&id);
        self.store_route_plan(&plan).await?;
        self.discard_durations().await;

        Ok(locations)
    }

    #[tracing::instrument(skip(self))]
    async fn reorder_locations(
        &self,
        from_index: usize,
        to_index: usize,
    ) -> Result<Vec<Location>, Error> {
        let mut locations = self.load_locations().await?;

        if from_index >= locations.len() || to_index >= locations.len() {
            return Err(invalid_input_error());
        }

        let moved = locations.remove(from_index);
        locations.insert(to_index, moved);

        self.store_locations(&locations).await?;
        self.reset_route_state().await?;

        Ok(locations)
    }
}
