use chrono::{Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::env;

use crate::{
    entities::{Coordinates, TravelMode},
    error::{access_denied_error, malformed_request_error, upstream_error, Error},
};

/// A request endpoint: an opaque place reference when one is known (snapped
/// stations), otherwise a raw coordinate.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum Waypoint {
    Place {
        #[serde(rename = "placeId")]
        place_id: String,
    },
    Point {
        location: PointLocation,
    },
}

impl Waypoint {
    pub fn place(place_id: String) -> Self {
        Self::Place { place_id }
    }

    pub fn point(coordinates: Coordinates) -> Self {
        Self::Point {
            location: PointLocation {
                lat_lng: LatLng {
                    latitude: coordinates.latitude,
                    longitude: coordinates.longitude,
                },
            },
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct PointLocation {
    #[serde(rename = "latLng")]
    pub lat_lng: LatLng,
}

#[derive(Clone, Debug, Serialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeRoutesRequest {
    pub origin: Waypoint,
    pub destination: Waypoint,
    pub travel_mode: TravelMode,
    pub compute_alternative_routes: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transit_preferences: Option<TransitPreferences>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitPreferences {
    pub routing_preference: String,
    pub allowed_travel_modes: Vec<String>,
}

impl TransitPreferences {
    /// The relaxed preferences of the last escalation attempt: minimize
    /// walking and allow every rail/bus sub-mode explicitly.
    pub fn relaxed() -> Self {
        Self {
            routing_preference: "LESS_WALKING".into(),
            allowed_travel_modes: vec![
                "TRAIN".into(),
                "SUBWAY".into(),
                "RAIL".into(),
                "BUS".into(),
            ],
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ComputeRoutesResponse {
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    #[serde(default)]
    pub legs: Vec<Leg>,
    pub polyline: Option<Polyline>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    /// Seconds with a trailing unit, e.g. `"1800s"`.
    pub duration: Option<String>,
    #[serde(default)]
    pub distance_meters: u64,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub polyline: Option<Polyline>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Polyline {
    pub encoded_polyline: Option<String>,
}

/// Departure time 5 minutes out, so the routing service never rejects the
/// request as departing in the past.
pub fn departure_time_soon() -> String {
    (Utc::now() + Duration::minutes(5)).to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[tracing::instrument(skip(request))]
pub async fn compute_routes(request: &ComputeRoutesRequest) -> Result<ComputeRoutesResponse, Error> {
    let api_base =
        env::var("GOOGLE_ROUTES_API_BASE").unwrap_or_else(|_| "routes.googleapis.com".into());
    let key = env::var("GOOGLE_ROUTES_API_KEY").or_else(|_| env::var("GOOGLE_MAPS_API_KEY"))?;
    let url = format!("https://{}/directions/v2:computeRoutes", api_base);

    let res = reqwest::Client::new()
        .post(url)
        .header("X-Goog-Api-Key", key)
        .header("X-Goog-FieldMask", "routes,geocodingResults")
        .json(request)
        .send()
        .await?;

    let status_code = res.status().as_u16();

    if status_code == 400 {
        return Err(malformed_request_error());
    } else if status_code == 403 {
        return Err(access_denied_error());
    } else if status_code != 200 {
        return Err(upstream_error());
    }

    Ok(res.json().await?)
}
