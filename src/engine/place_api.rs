use async_trait::async_trait;
use uuid::Uuid;

use super::Engine;
use crate::{
    api::PlaceAPI,
    entities::LocationDraft,
    error::Error,
    external::google_places::{self, PlaceSuggestions},
};

#[async_trait]
impl PlaceAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn find_place_suggestions(&self, query: String) -> Result<PlaceSuggestions, Error> {
        let session_token = Uuid::new_v4().to_string();

        google_places::find_place_suggestions(query, session_token).await
    }

    /// Turn a selected suggestion into a draft location ready for the trip
    /// log, carrying the transit flag when the place is a station of some
    /// kind.
    #[tracing::instrument(skip(self))]
    async fn resolve_place(&self, place_id: String) -> Result<LocationDraft, Error> {
        let session_token = Uuid::new_v4().to_string();

        let place = google_places::find_place(place_id, session_token).await?;

        Ok(LocationDraft {
            name: place
                .name
                .unwrap_or_else(|| place.formatted_address.clone()),
            address: place.formatted_address,
            latitude: place.geometry.location.lat,
            longitude: place.geometry.location.lng,
            visited_date: None,
            description: None,
            is_transit_station: google_places::is_transit_category(&place.types),
        })
    }
}
