use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A visited place in the trip log. List order is user-significant: it is
/// the iteration order used to derive route segments.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub visited_date: NaiveDate,
    pub description: Option<String>,
    #[serde(default)]
    pub is_transit_station: bool,
}

/// User-supplied fields of a [`Location`], before an id is assigned.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocationDraft {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub visited_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_transit_station: bool,
}

impl Location {
    pub fn new(draft: LocationDraft) -> Self {
        Self {
            id: Utc::now().timestamp_millis().to_string(),
            name: draft.name,
            address: draft.address,
            latitude: draft.latitude,
            longitude: draft.longitude,
            visited_date: draft.visited_date.unwrap_or_else(|| Utc::now().date_naive()),
            description: draft.description,
            is_transit_station: draft.is_transit_station,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Coordinates> for String {
    fn from(coordinates: Coordinates) -> Self {
        format!("{},{}", coordinates.latitude, coordinates.longitude)
    }
}
