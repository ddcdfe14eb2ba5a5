use geo_types::LineString;

use crate::external::google_routes::{ComputeRoutesResponse, Route};

/// One segment's result, converted from the routing service response into
/// the shape shared by the transit and non-transit code paths.
#[derive(Clone, Debug)]
pub struct SegmentSummary {
    pub duration_text: String,
    pub duration_seconds: u64,
    pub distance_text: String,
    pub distance_meters: u64,
    pub paths: Vec<LineString<f64>>,
}

/// Summarize the first route's first leg, or `None` when the response has
/// no usable route.
pub fn summarize(response: &ComputeRoutesResponse) -> Option<SegmentSummary> {
    let route = response.routes.first()?;
    let leg = route.legs.first()?;

    let duration_seconds = leg
        .duration
        .as_deref()
        .map(parse_duration_seconds)
        .unwrap_or(0);
    let distance_meters = leg.distance_meters;

    Some(SegmentSummary {
        duration_text: format_duration(duration_seconds),
        duration_seconds,
        distance_text: format_distance(distance_meters),
        distance_meters,
        paths: decode_paths(route),
    })
}

/// The routing service returns durations as `"1800s"`.
pub fn parse_duration_seconds(raw: &str) -> u64 {
    raw.trim_end_matches('s').parse().unwrap_or(0)
}

pub fn format_duration(seconds: u64) -> String {
    let minutes = seconds / 60;

    if minutes > 0 {
        format!("{}分", minutes)
    } else {
        "1分未満".into()
    }
}

pub fn format_distance(meters: u64) -> String {
    if meters > 1000 {
        let km = (meters as f64 / 1000.0 * 10.0).round() / 10.0;
        format!("{}km", km)
    } else {
        format!("{}m", meters)
    }
}

/// Decode the route geometry: the whole-route polyline when present,
/// otherwise the per-step polylines. A chunk that fails to decode is
/// logged and skipped without failing the segment.
fn decode_paths(route: &Route) -> Vec<LineString<f64>> {
    let encoded: Vec<&str> = match route
        .polyline
        .as_ref()
        .and_then(|polyline| polyline.encoded_polyline.as_deref())
    {
        Some(whole) => vec![whole],
        None => route
            .legs
            .iter()
            .flat_map(|leg| leg.steps.iter())
            .filter_map(|step| {
                step.polyline
                    .as_ref()
                    .and_then(|polyline| polyline.encoded_polyline.as_deref())
            })
            .collect(),
    };

    let mut paths = Vec::new();

    for chunk in encoded {
        match polyline::decode_polyline(chunk, 5) {
            Ok(path) => paths.push(path),
            Err(err) => tracing::warn!(%err, "failed to decode route polyline, skipping"),
        }
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::google_routes::{Leg, Polyline, Step};

    #[test]
    fn parses_duration_strings() {
        assert_eq!(parse_duration_seconds("1800s"), 1800);
        assert_eq!(parse_duration_seconds("0s"), 0);
        assert_eq!(parse_duration_seconds("garbage"), 0);
    }

    #[test]
    fn formats_durations() {
        assert_eq!(format_duration(1800), "30分");
        assert_eq!(format_duration(59), "1分未満");
        assert_eq!(format_duration(0), "1分未満");
    }

    #[test]
    fn formats_distances() {
        assert_eq!(format_distance(5000), "5km");
        assert_eq!(format_distance(1536), "1.5km");
        assert_eq!(format_distance(1000), "1000m");
        assert_eq!(format_distance(500), "500m");
    }

    #[test]
    fn summarizes_the_first_leg() {
        let response = ComputeRoutesResponse {
            routes: vec![Route {
                legs: vec![Leg {
                    duration: Some("1800s".into()),
                    distance_meters: 5000,
                    steps: vec![],
                }],
                polyline: None,
            }],
        };

        let summary = summarize(&response).unwrap();

        assert_eq!(summary.duration_text, "30分");
        assert_eq!(summary.duration_seconds, 1800);
        assert_eq!(summary.distance_text, "5km");
        assert_eq!(summary.distance_meters, 5000);
        assert!(summary.paths.is_empty());
    }

    #[test]
    fn empty_responses_summarize_to_none() {
        assert!(summarize(&ComputeRoutesResponse::default()).is_none());
    }

    #[test]
    fn whole_route_polyline_wins_over_step_polylines() {
        let step = Step {
            polyline: Some(Polyline {
                encoded_polyline: Some("_p~iF~ps|U_ulLnnqC_mqNvxq`@".into()),
            }),
        };
        let response = ComputeRoutesResponse {
            routes: vec![Route {
                legs: vec![Leg {
                    duration: Some("60s".into()),
                    distance_meters: 100,
                    steps: vec![step.clone(), step],
                }],
                polyline: Some(Polyline {
                    encoded_polyline: Some("_p~iF~ps|U_ulLnnqC_mqNvxq`@".into()),
                }),
            }],
        };

        let summary = summarize(&response).unwrap();
        assert_eq!(summary.paths.len(), 1);
        assert_eq!(summary.paths[0].0.len(), 3);
    }

    #[test]
    fn step_polylines_are_used_when_no_whole_route_polyline() {
        let step = Step {
            polyline: Some(Polyline {
                encoded_polyline: Some("_p~iF~ps|U_ulLnnqC_mqNvxq`@".into()),
            }),
        };
        let response = ComputeRoutesResponse {
            routes: vec![Route {
                legs: vec![Leg {
                    duration: Some("60s".into()),
                    distance_meters: 100,
                    steps: vec![step.clone(), step],
                }],
                polyline: None,
            }],
        };

        let summary = summarize(&response).unwrap();
        assert_eq!(summary.paths.len(), 2);
    }
}
