use serde::{Deserialize, Serialize};
use std::env;

use crate::{
    entities::Coordinates,
    error::{invalid_input_error, upstream_error, Error},
};

/// Category tags marking a place as a transit stop of some kind.
const TRANSIT_CATEGORIES: [&str; 4] = [
    "transit_station",
    "train_station",
    "subway_station",
    "bus_station",
];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Place {
    pub place_id: String,
    pub formatted_address: String,
    pub geometry: Geometry,
    pub name: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
}

/// A result of the nearest-category search. Carries no formatted address;
/// only the fields the station snapper needs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NearbyPlace {
    pub place_id: String,
    pub name: String,
    pub geometry: Geometry,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<LatLng> for Coordinates {
    fn from(position: LatLng) -> Self {
        Coordinates {
            latitude: position.lat,
            longitude: position.lng,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    pub place_id: String,
    pub description: String,
    #[serde(default)]
    pub types: Vec<String>,
}

pub type PlaceSuggestions = Vec<PlaceSuggestion>;

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response<T> {
    status: String,
    result: Option<T>,
    results: Option<T>,
    predictions: Option<T>,
}

pub fn is_transit_category(types: &[String]) -> bool {
    types
        .iter()
        .any(|tag| TRANSIT_CATEGORIES.contains(&tag.as_str()))
}

#[tracing::instrument]
pub async fn find_place_suggestions(
    input: String,
    session_token: String,
) -> Result<PlaceSuggestions, Error> {
    let api_base = env::var("GOOGLE_MAPS_API_BASE")?;
    let url = format!("https://{}/maps/api/place/autocomplete/json", api_base);
    let key = env::var("GOOGLE_MAPS_API_KEY")?;

    let res = reqwest::Client::new()
        .get(url)
        .query(&[("key", key)])
        .query(&[("input", input)])
        .query(&[("sessiontoken", session_token)])
        .send()
        .await?;

    let status_code = res.status().as_u16();

    if status_code >= 400 && status_code < 500 {
        return Err(invalid_input_error());
    } else if status_code != 200 {
        return Err(upstream_error());
    }

    let data: Response<PlaceSuggestions> = res.json().await?;

    if !(data.status == "OK" || data.status == "ZERO_RESULTS") {
        return Err(upstream_error());
    }

    Ok(data.predictions.unwrap_or_default())
}

#[tracing::instrument]
pub async fn find_place(id: String, session_token: String) -> Result<Place, Error> {
    let api_base = env::var("GOOGLE_MAPS_API_BASE")?;
    let url = format!("https://{}/maps/api/place/details/json", api_base);
    let key = env::var("GOOGLE_MAPS_API_KEY")?;

    let res = reqwest::Client::new()
        .get(url)
        .query(&[("key", key)])
        .query(&[("sessiontoken", session_token)])
        .query(&[("place_id", id)])
        .send()
        .await?;

    let status_code = res.status().as_u16();

    if status_code >= 400 && status_code < 500 {
        return Err(invalid_input_error());
    } else if status_code != 200 {
        return Err(upstream_error());
    }

    let data: Response<Place> = res.json().await?;

    if data.status != "OK" {
        return Err(upstream_error());
    }

    data.result.ok_or_else(upstream_error)
}

/// Nearest place of the given category, ranked by distance from the
/// coordinate. No radius cap: rank-by-distance and radius are mutually
/// exclusive on the places service.
#[tracing::instrument]
pub async fn find_nearest(
    location: Coordinates,
    category: &str,
) -> Result<Option<NearbyPlace>, Error> {
    let location: String = location.into();

    let api_base = env::var("GOOGLE_MAPS_API_BASE")?;
    let url = format!("https://{}/maps/api/place/nearbysearch/json", api_base);
    let key = env::var("GOOGLE_MAPS_API_KEY")?;

    let res = reqwest::Client::new()
        .get(url)
        .query(&[("key", key)])
        .query(&[("location", location)])
        .query(&[("rankby", "distance".to_string())])
        .query(&[("type", category.to_string())])
        .send()
        .await?;

    let status_code = res.status().as_u16();

    if status_code >= 400 && status_code < 500 {
        return Err(invalid_input_error());
    } else if status_code != 200 {
        return Err(upstream_error());
    }

    let data: Response<Vec<NearbyPlace>> = res.json().await?;

    if !(data.status == "OK" || data.status == "ZERO_RESULTS") {
        return Err(upstream_error());
    }

    Ok(data
        .results
        .unwrap_or_default()
        .into_iter()
        .next())
}
