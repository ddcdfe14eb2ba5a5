use std::collections::HashMap;
use std::env;

use axum::extract::{Json, Query};
use serde_json::Value;

use crate::entities::{Coordinates, TravelMode};
use crate::error::{invalid_input_error, upstream_error, Error};
use crate::external::google_routes::{self, ComputeRoutesRequest, ComputeRoutesResponse, Waypoint};

/// Passthrough to the public transit open-data API. The consumer key stays
/// server-side; everything else is forwarded untouched.
pub async fn odpt(
    Query(mut params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, Error> {
    let api_base = env::var("ODPT_API_BASE").unwrap_or_else(|_| "api.odpt.org/api/v4".into());
    let key = env::var("ODPT_API_KEY")?;

    let path = params.remove("path").ok_or_else(invalid_input_error)?;
    params.insert("acl:consumerKey".into(), key);

    let url = format!("https://{}/{}", api_base, path);

    let res = reqwest::Client::new().get(url).query(&params).send().await?;

    if res.status().as_u16() != 200 {
        return Err(upstream_error());
    }

    Ok(Json(res.json().await?))
}

/// Fixed Tokyo-Station-to-Shinjuku transit probe, for checking the routing
/// credential without touching any stored state.
pub async fn routes_smoke() -> Result<Json<ComputeRoutesResponse>, Error> {
    let request = ComputeRoutesRequest {
        origin: Waypoint::point(Coordinates {
            latitude: 35.681236,
            longitude: 139.767125,
        }),
        destination: Waypoint::point(Coordinates {
            latitude: 35.689487,
            longitude: 139.691706,
        }),
        travel_mode: TravelMode::Transit,
        compute_alternative_routes: false,
        departure_time: Some(google_routes::departure_time_soon()),
        transit_preferences: None,
    };

    let response = google_routes::compute_routes(&request).await?;

    Ok(response.into())
}
