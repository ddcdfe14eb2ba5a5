use crate::entities::Coordinates;
use crate::external::google_places;

/// The nearest transit-capable station to a raw coordinate.
#[derive(Clone, Debug)]
pub struct SnappedStation {
    pub coordinates: Coordinates,
    pub place_id: String,
    pub name: String,
}

/// Descending-specificity category queries; the first non-empty result wins.
const STATION_CATEGORIES: [&str; 3] = ["transit_station", "train_station", "subway_station"];

/// Snap a coordinate to the nearest station, or `None` when no station is
/// found or the lookup fails. Snapping is an optional optimization: a
/// failure here must never abort the caller, which falls back to the raw
/// coordinate.
#[tracing::instrument]
pub async fn find_nearest_station(point: &Coordinates) -> Option<SnappedStation> {
    for category in STATION_CATEGORIES {
        match google_places::find_nearest(point.clone(), category).await {
            Ok(Some(place)) => {
                return Some(SnappedStation {
                    coordinates: place.geometry.location.into(),
                    place_id: place.place_id,
                    name: place.name,
                })
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(
                    code = err.code,
                    category,
                    "nearest station lookup failed, keeping raw coordinates"
                );
                return None;
            }
        }
    }

    None
}
