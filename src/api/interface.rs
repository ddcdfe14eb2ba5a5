use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{Location, LocationDraft, RouteDurations, RoutePlan, TravelMode};
use crate::error::Error;
use crate::external::google_places::PlaceSuggestions;

#[async_trait]
pub trait LocationAPI {
    async fn list_locations(&self) -> Result<Vec<Location>, Error>;
    async fn add_location(&self, draft: LocationDraft) -> Result<Location, Error>;
    async fn delete_location(&self, id: String) -> Result<Vec<Location>, Error>;
    async fn reorder_locations(
        &self,
        from_index: usize,
        to_index: usize,
    ) -> Result<Vec<Location>, Error>;
}

#[async_trait]
pub trait RoutePlanAPI {
    async fn find_route_plan(&self) -> Result<RoutePlan, Error>;
    async fn confirm_route(&self) -> Result<RoutePlan, Error>;
    async fn set_segment_mode(
        &self,
        from_id: String,
        to_id: String,
        mode: TravelMode,
    ) -> Result<RoutePlan, Error>;
}

#[async_trait]
pub trait DurationAPI {
    async fn compute_route_durations(&self) -> Result<RouteDurations, Error>;
    async fn find_route_durations(&self) -> Result<RouteDurations, Error>;
}

#[async_trait]
pub trait PlaceAPI {
    async fn find_place_suggestions(&self, query: String) -> Result<PlaceSuggestions, Error>;
    async fn resolve_place(&self, place_id: String) -> Result<LocationDraft, Error>;
}

pub trait API: LocationAPI + RoutePlanAPI + DurationAPI + PlaceAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
