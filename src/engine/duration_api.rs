use async_trait::async_trait;

use super::Engine;
use crate::{
    api::DurationAPI,
    entities::{DurationBoard, Location, RouteDurations, SegmentDuration, TravelMode},
    error::Error,
    external::google_routes::{self, ComputeRoutesRequest, Waypoint},
    routing::{snapper, summary, transit},
};

#[async_trait]
impl DurationAPI for Engine {
    /// Compute a duration (and geometry) for every confirmed segment,
    /// strictly sequentially, plus the aggregate total. Individual segment
    /// failures are recorded as placeholders and never abort the batch.
    #[tracing::instrument(skip(self))]
    async fn compute_route_durations(&self) -> Result<RouteDurations, Error> {
        let plan = self.load_route_plan().await?;
        let locations = self.load_locations().await?;

        // clear previous results before issuing any request, so stale
        // overlays never accumulate
        let generation = self.next_generation();
        {
            let mut shared = self.board.write().await;
            shared.reset(generation);
        }

        if !plan.confirmed || plan.segments.is_empty() {
            return Ok(self.board.read().await.snapshot());
        }

        let mut board = DurationBoard::new(generation);

        for segment in &plan.segments {
            let from = locations.iter().find(|location| location.id == segment.from_id);
            let to = locations.iter().find(|location| location.id == segment.to_id);

            let (from, to) = match (from, to) {
                (Some(from), Some(to)) => (from, to),
                _ => continue,
            };

            tracing::info!(
                from = %from.name,
                to = %to.name,
                mode = segment.mode.as_str(),
                "computing segment duration"
            );

            let duration = match segment.mode {
                TravelMode::Transit => self.transit_segment(from, to, &mut board).await,
                mode => self.direct_segment(from, to, mode, &mut board).await,
            };

            board.record(segment.key(), duration);
        }

        // publish unless a newer pass started in the meantime
        let mut shared = self.board.write().await;
        if shared.generation() == generation {
            *shared = board;
        } else {
            tracing::debug!(
                generation,
                current = shared.generation(),
                "discarding stale duration pass"
            );
        }

        Ok(shared.snapshot())
    }

    #[tracing::instrument(skip(self))]
    async fn find_route_durations(&self) -> Result<RouteDurations, Error> {
        Ok(self.board.read().await.snapshot())
    }
}

impl Engine {
    /// One directions lookup with the segment's literal coordinates. An
    /// empty route list is a recoverable, segment-local "no route".
    async fn direct_segment(
        &self,
        from: &Location,
        to: &Location,
        mode: TravelMode,
        board: &mut DurationBoard,
    ) -> SegmentDuration {
        let request = ComputeRoutesRequest {
            origin: Waypoint::point(from.coordinates()),
            destination: Waypoint::point(to.coordinates()),
            travel_mode: mode,
            compute_alternative_routes: false,
            departure_time: None,
            transit_preferences: None,
        };

        match google_routes::compute_routes(&request).await {
            Ok(response) => match summary::summarize(&response) {
                Some(outcome) => {
                    board.extend_paths(outcome.paths);
                    SegmentDuration::routed(
                        outcome.duration_text,
                        outcome.duration_seconds,
                        outcome.distance_text,
                    )
                }
                None => SegmentDuration::route_not_found(),
            },
            Err(err) => {
                tracing::warn!(
                    code = err.code,
                    from = %from.name,
                    to = %to.name,
                    "segment routing lookup failed"
                );
                SegmentDuration::lookup_failed()
            }
        }
    }

    /// The transit path: snap both endpoints to their nearest stations,
    /// then run the four-attempt escalation. A request rejection aborts
    /// the escalation for this segment only.
    async fn transit_segment(
        &self,
        from: &Location,
        to: &Location,
        board: &mut DurationBoard,
    ) -> SegmentDuration {
        let from_snap = snapper::find_nearest_station(&from.coordinates()).await;
        let to_snap = snapper::find_nearest_station(&to.coordinates()).await;

        let departure_time = google_routes::departure_time_soon();
        let attempts = transit::build_attempts(
            &from.coordinates(),
            &to.coordinates(),
            from_snap.as_ref(),
            to_snap.as_ref(),
            &departure_time,
        );

        let outcome = transit::run_escalation(attempts, |request| async move {
            google_routes::compute_routes(&request).await
        })
        .await;

        match outcome {
            Ok(Some(response)) => match summary::summarize(&response) {
                Some(outcome) => {
                    board.extend_paths(outcome.paths);
                    SegmentDuration::routed(
                        outcome.duration_text,
                        outcome.duration_seconds,
                        outcome.distance_text,
                    )
                }
                None => SegmentDuration::transit_route_not_found(),
            },
            Ok(None) => SegmentDuration::transit_route_not_found(),
            Err(err) => {
                tracing::warn!(
                    code = err.code,
                    from = %from.name,
                    to = %to.name,
                    "transit escalation aborted"
                );
                SegmentDuration::transit_route_not_found()
            }
        }
    }
}
