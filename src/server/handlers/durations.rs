use axum::extract::{Extension, Json};

use crate::api::DurationAPI;
use crate::entities::RouteDurations;
use crate::error::Error;
use crate::server::DynAPI;

pub async fn find(Extension(api): Extension<DynAPI>) -> Result<Json<RouteDurations>, Error> {
    let durations = api.find_route_durations().await?;

    Ok(durations.into())
}

pub async fn compute(Extension(api): Extension<DynAPI>) -> Result<Json<RouteDurations>, Error> {
    let durations = api.compute_route_durations().await?;

    Ok(durations.into())
}
