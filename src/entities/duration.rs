use std::collections::BTreeMap;

use geo_types::LineString;
use serde::{Deserialize, Serialize};

/// Durations at or above 24 hours are a sentinel the routing service emits
/// for broken pairs, not a real travel time. They keep their per-segment
/// display text but are excluded from the total.
pub const ANOMALOUS_DURATION_SECS: u64 = 24 * 60 * 60;

/// Per-segment duration result. `seconds` is absent when the lookup failed
/// and `text` carries a placeholder instead of a real duration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentDuration {
    pub text: String,
    pub seconds: Option<u64>,
    pub distance: Option<String>,
}

impl SegmentDuration {
    pub fn routed(text: String, seconds: u64, distance: String) -> Self {
        Self {
            text,
            seconds: Some(seconds),
            distance: Some(distance),
        }
    }

    pub fn route_not_found() -> Self {
        Self {
            text: "ルート未発見".into(),
            seconds: None,
            distance: None,
        }
    }

    pub fn transit_route_not_found() -> Self {
        Self {
            text: "電車ルート未発見".into(),
            seconds: None,
            distance: None,
        }
    }

    pub fn lookup_failed() -> Self {
        Self {
            text: "計算エラー".into(),
            seconds: None,
            distance: None,
        }
    }
}

/// Ephemeral result state of one duration pass over a confirmed route.
///
/// Owned by the orchestrator alone; discarded whenever the route is
/// unconfirmed, the location list changes, or a newer pass starts. The
/// generation tag identifies the pass that produced it.
#[derive(Clone, Debug, Default)]
pub struct DurationBoard {
    generation: u64,
    durations: BTreeMap<String, SegmentDuration>,
    total_minutes: u64,
    paths: Vec<LineString<f64>>,
}

impl DurationBoard {
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            ..Self::default()
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drop all results and retag the board with the new pass.
    pub fn reset(&mut self, generation: u64) {
        *self = Self::new(generation);
    }

    /// Record one segment's outcome. Successful durations below the
    /// anomalous threshold contribute floor(seconds / 60) minutes to the
    /// total; anything else is displayed but not summed.
    pub fn record(&mut self, key: String, duration: SegmentDuration) {
        match duration.seconds {
            Some(seconds) if seconds < ANOMALOUS_DURATION_SECS => {
                self.total_minutes += seconds / 60;
            }
            Some(seconds) => {
                tracing::warn!(%key, seconds, "skipping anomalously long duration");
            }
            None => {}
        }

        self.durations.insert(key, duration);
    }

    pub fn extend_paths(&mut self, paths: Vec<LineString<f64>>) {
        self.paths.extend(paths);
    }

    pub fn total_minutes(&self) -> u64 {
        self.total_minutes
    }

    /// Hours+minutes above an hour, minutes alone below it. An all-failed
    /// or all-excluded route yields no total rather than "0分".
    pub fn total_text(&self) -> Option<String> {
        if self.total_minutes == 0 {
            return None;
        }

        let hours = self.total_minutes / 60;
        let minutes = self.total_minutes % 60;

        if hours > 0 {
            Some(format!("{}時間{}分", hours, minutes))
        } else {
            Some(format!("{}分", minutes))
        }
    }

    pub fn snapshot(&self) -> RouteDurations {
        RouteDurations {
            durations: self.durations.clone(),
            total_minutes: self.total_minutes,
            total: self.total_text(),
            paths: self
                .paths
                .iter()
                .map(|path| path.points().map(|point| [point.x(), point.y()]).collect())
                .collect(),
        }
    }
}

/// Serializable snapshot of a [`DurationBoard`] for API consumers. Paths are
/// (x, y) coordinate pairs of the decoded route geometry.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RouteDurations {
    pub durations: BTreeMap<String, SegmentDuration>,
    pub total_minutes: u64,
    pub total: Option<String>,
    pub paths: Vec<Vec<[f64; 2]>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_floor_to_minutes() {
        let mut board = DurationBoard::new(1);

        board.record(
            "a-b".into(),
            SegmentDuration::routed("30分".into(), 1800, "5km".into()),
        );
        board.record(
            "b-c".into(),
            SegmentDuration::routed("1分未満".into(), 119, "100m".into()),
        );

        // 1800s -> 30min, 119s -> 1min (floored)
        assert_eq!(board.total_minutes(), 31);
        assert_eq!(board.total_text().unwrap(), "31分");
    }

    #[test]
    fn anomalous_durations_are_displayed_but_not_summed() {
        let mut board = DurationBoard::new(1);

        board.record(
            "a-b".into(),
            SegmentDuration::routed("1440分".into(), ANOMALOUS_DURATION_SECS, "10km".into()),
        );
        board.record(
            "b-c".into(),
            SegmentDuration::routed("30分".into(), 1800, "5km".into()),
        );

        assert_eq!(board.total_minutes(), 30);

        let snapshot = board.snapshot();
        assert_eq!(snapshot.durations["a-b"].text, "1440分");
    }

    #[test]
    fn failed_segments_keep_placeholders_out_of_the_total() {
        let mut board = DurationBoard::new(1);

        board.record("a-b".into(), SegmentDuration::route_not_found());
        board.record("b-c".into(), SegmentDuration::transit_route_not_found());

        assert_eq!(board.total_minutes(), 0);
        assert!(board.total_text().is_none());

        let snapshot = board.snapshot();
        assert_eq!(snapshot.durations["a-b"].text, "ルート未発見");
        assert_eq!(snapshot.durations["b-c"].text, "電車ルート未発見");
        assert!(snapshot.total.is_none());
    }

    #[test]
    fn totals_above_an_hour_use_hours_and_minutes() {
        let mut board = DurationBoard::new(1);

        board.record(
            "a-b".into(),
            SegmentDuration::routed("90分".into(), 90 * 60, "40km".into()),
        );

        assert_eq!(board.total_text().unwrap(), "1時間30分");
    }

    #[test]
    fn reset_discards_results_and_retags() {
        let mut board = DurationBoard::new(1);
        board.record(
            "a-b".into(),
            SegmentDuration::routed("30分".into(), 1800, "5km".into()),
        );

        board.reset(2);

        assert_eq!(board.generation(), 2);
        assert_eq!(board.total_minutes(), 0);
        assert!(board.snapshot().durations.is_empty());
    }
}
