use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};

use crate::api::LocationAPI;
use crate::entities::{Location, LocationDraft};
use crate::error::Error;
use crate::server::DynAPI;

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<Location>>, Error> {
    let locations = api.list_locations().await?;

    Ok(locations.into())
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(draft): Json<LocationDraft>,
) -> Result<Json<Location>, Error> {
    let location = api.add_location(draft).await?;

    Ok(location.into())
}

pub async fn remove(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Location>>, Error> {
    let locations = api.delete_location(id).await?;

    Ok(locations.into())
}

#[derive(Serialize, Deserialize)]
pub struct ReorderParams {
    from_index: usize,
    to_index: usize,
}

pub async fn reorder(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<ReorderParams>,
) -> Result<Json<Vec<Location>>, Error> {
    let locations = api
        .reorder_locations(params.from_index, params.to_index)
        .await?;

    Ok(locations.into())
}
