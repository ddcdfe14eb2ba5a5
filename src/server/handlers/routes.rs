use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::RoutePlanAPI;
use crate::entities::{RoutePlan, TravelMode};
use crate::error::Error;
use crate::server::DynAPI;

pub async fn find(Extension(api): Extension<DynAPI>) -> Result<Json<RoutePlan>, Error> {
    let plan = api.find_route_plan().await?;

    Ok(plan.into())
}

pub async fn confirm(Extension(api): Extension<DynAPI>) -> Result<Json<RoutePlan>, Error> {
    let plan = api.confirm_route().await?;

    Ok(plan.into())
}

#[derive(Serialize, Deserialize)]
pub struct SetModeParams {
    from_id: String,
    to_id: String,
    mode: TravelMode,
}

pub async fn set_mode(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<SetModeParams>,
) -> Result<Json<RoutePlan>, Error> {
    let plan = api
        .set_segment_mode(params.from_id, params.to_id, params.mode)
        .await?;

    Ok(plan.into())
}
