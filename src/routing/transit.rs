use std::future::Future;

use crate::entities::{Coordinates, TravelMode};
use crate::error::Error;
use crate::external::google_routes::{
    ComputeRoutesRequest, ComputeRoutesResponse, TransitPreferences, Waypoint,
};
use crate::routing::snapper::SnappedStation;

/// Build the four-attempt transit escalation for one segment, in order:
///
/// 1. snapped stations by place id, standard preferences
/// 2. snapped coordinates, no place ids
/// 3. the original un-snapped coordinates
/// 4. snapped stations by place id, relaxed preferences
///
/// An endpoint without a snap degrades to its coordinate in attempts 1 and
/// 2, so the escalation is always exactly four requests.
pub fn build_attempts(
    from: &Coordinates,
    to: &Coordinates,
    from_snap: Option<&SnappedStation>,
    to_snap: Option<&SnappedStation>,
    departure_time: &str,
) -> Vec<ComputeRoutesRequest> {
    let from_point = from_snap
        .map(|snap| snap.coordinates.clone())
        .unwrap_or_else(|| from.clone());
    let to_point = to_snap
        .map(|snap| snap.coordinates.clone())
        .unwrap_or_else(|| to.clone());

    let by_place = |snap: Option<&SnappedStation>, fallback: &Coordinates| match snap {
        Some(snap) => Waypoint::place(snap.place_id.clone()),
        None => Waypoint::point(fallback.clone()),
    };

    let request = |origin: Waypoint,
                   destination: Waypoint,
                   preferences: Option<TransitPreferences>| {
        ComputeRoutesRequest {
            origin,
            destination,
            travel_mode: TravelMode::Transit,
            compute_alternative_routes: true,
            departure_time: Some(departure_time.to_string()),
            transit_preferences: preferences,
        }
    };

    vec![
        request(
            by_place(from_snap, &from_point),
            by_place(to_snap, &to_point),
            None,
        ),
        request(
            Waypoint::point(from_point.clone()),
            Waypoint::point(to_point.clone()),
            None,
        ),
        request(Waypoint::point(from.clone()), Waypoint::point(to.clone()), None),
        request(
            by_place(from_snap, &from_point),
            by_place(to_snap, &to_point),
            Some(TransitPreferences::relaxed()),
        ),
    ]
}

/// Run the attempts in order, stopping at the first one returning at least
/// one route. A request rejection (HTTP 400/403) aborts the remaining
/// attempts; any other failure or an empty route list escalates to the
/// next. `Ok(None)` means all attempts were exhausted without a route.
pub async fn run_escalation<F, Fut>(
    attempts: Vec<ComputeRoutesRequest>,
    mut send: F,
) -> Result<Option<ComputeRoutesResponse>, Error>
where
    F: FnMut(ComputeRoutesRequest) -> Fut,
    Fut: Future<Output = Result<ComputeRoutesResponse, Error>>,
{
    for (number, attempt) in attempts.into_iter().enumerate() {
        match send(attempt).await {
            Ok(response) if !response.routes.is_empty() => return Ok(Some(response)),
            Ok(_) => {
                tracing::debug!(attempt = number + 1, "transit attempt returned no routes");
            }
            Err(err) if err.is_request_rejection() => return Err(err),
            Err(err) => {
                tracing::warn!(
                    attempt = number + 1,
                    code = err.code,
                    "transit attempt failed"
                );
            }
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{access_denied_error, upstream_error};
    use crate::external::google_routes::{Leg, Route};
    use std::cell::Cell;
    use tokio_test::block_on;

    fn coordinates(latitude: f64, longitude: f64) -> Coordinates {
        Coordinates {
            latitude,
            longitude,
        }
    }

    fn snap(place_id: &str, latitude: f64, longitude: f64) -> SnappedStation {
        SnappedStation {
            coordinates: coordinates(latitude, longitude),
            place_id: place_id.into(),
            name: "station".into(),
        }
    }

    fn response_with_route(duration_secs: u64, distance_meters: u64) -> ComputeRoutesResponse {
        ComputeRoutesResponse {
            routes: vec![Route {
                legs: vec![Leg {
                    duration: Some(format!("{}s", duration_secs)),
                    distance_meters,
                    steps: vec![],
                }],
                polyline: None,
            }],
        }
    }

    #[test]
    fn attempts_escalate_from_place_ids_to_relaxed_preferences() {
        let from = coordinates(35.681236, 139.767125);
        let to = coordinates(35.689487, 139.691706);
        let from_snap = snap("station-from", 35.6812, 139.7671);
        let to_snap = snap("station-to", 35.6896, 139.7006);

        let attempts = build_attempts(&from, &to, Some(&from_snap), Some(&to_snap), "t");

        assert_eq!(attempts.len(), 4);
        assert!(matches!(&attempts[0].origin, Waypoint::Place { place_id } if place_id == "station-from"));
        assert!(matches!(&attempts[1].origin, Waypoint::Point { .. }));
        assert!(matches!(&attempts[2].origin, Waypoint::Point { .. }));
        assert!(matches!(&attempts[3].destination, Waypoint::Place { place_id } if place_id == "station-to"));

        assert!(attempts[0].transit_preferences.is_none());
        assert!(attempts[3].transit_preferences.is_some());
        assert!(attempts
            .iter()
            .all(|attempt| attempt.travel_mode == TravelMode::Transit
                && attempt.compute_alternative_routes
                && attempt.departure_time.is_some()));
    }

    #[test]
    fn unsnapped_endpoints_degrade_to_raw_coordinates() {
        let from = coordinates(35.0, 139.0);
        let to = coordinates(36.0, 140.0);

        let attempts = build_attempts(&from, &to, None, None, "t");

        assert_eq!(attempts.len(), 4);
        assert!(matches!(&attempts[0].origin, Waypoint::Point { .. }));
        assert!(matches!(&attempts[3].origin, Waypoint::Point { .. }));
    }

    #[test]
    fn escalation_takes_the_first_attempt_with_routes() {
        let from = coordinates(35.681236, 139.767125);
        let to = coordinates(35.689487, 139.691706);
        let attempts = build_attempts(&from, &to, None, None, "t");

        let calls = Cell::new(0);
        let result = block_on(run_escalation(attempts, |_| {
            calls.set(calls.get() + 1);
            let call = calls.get();
            async move {
                if call == 1 {
                    Ok(ComputeRoutesResponse::default())
                } else {
                    Ok(response_with_route(1800, 5000))
                }
            }
        }))
        .unwrap();

        assert_eq!(calls.get(), 2);
        let response = result.unwrap();
        assert_eq!(response.routes[0].legs[0].duration.as_deref(), Some("1800s"));
    }

    #[test]
    fn request_rejection_aborts_remaining_attempts() {
        let from = coordinates(35.0, 139.0);
        let to = coordinates(36.0, 140.0);
        let attempts = build_attempts(&from, &to, None, None, "t");

        let calls = Cell::new(0);
        let result = block_on(run_escalation(attempts, |_| {
            calls.set(calls.get() + 1);
            async { Err(access_denied_error()) }
        }));

        assert_eq!(calls.get(), 1);
        assert!(result.is_err());
        assert!(result.unwrap_err().is_request_rejection());
    }

    #[test]
    fn transient_failures_escalate_until_exhaustion() {
        let from = coordinates(35.0, 139.0);
        let to = coordinates(36.0, 140.0);
        let attempts = build_attempts(&from, &to, None, None, "t");

        let calls = Cell::new(0);
        let result = block_on(run_escalation(attempts, |_| {
            calls.set(calls.get() + 1);
            let call = calls.get();
            async move {
                if call % 2 == 0 {
                    Err(upstream_error())
                } else {
                    Ok(ComputeRoutesResponse::default())
                }
            }
        }))
        .unwrap();

        assert_eq!(calls.get(), 4);
        assert!(result.is_none());
    }
}
