use axum::extract::{Extension, Json, Path, Query};
use serde::{Deserialize, Serialize};

use crate::api::PlaceAPI;
use crate::entities::LocationDraft;
use crate::error::Error;
use crate::external::google_places::PlaceSuggestions;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct SuggestionParams {
    query: String,
}

pub async fn list_suggestions(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<SuggestionParams>,
) -> Result<Json<PlaceSuggestions>, Error> {
    let suggestions = api.find_place_suggestions(params.query).await?;

    Ok(suggestions.into())
}

pub async fn resolve(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
) -> Result<Json<LocationDraft>, Error> {
    let draft = api.resolve_place(id).await?;

    Ok(draft.into())
}
