use serde::{Deserialize, Serialize};

use crate::entities::{Location, RouteSegment, TravelMode};
use crate::error::{invalid_input_error, Error};

/// The confirmed-or-planning state of the route.
///
/// Confirmation is a one-shot commitment: any later edit to the underlying
/// location list invalidates the plan, and duration data must never exist
/// while `confirmed` is false.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RoutePlan {
    pub segments: Vec<RouteSegment>,
    pub confirmed: bool,
}

impl RoutePlan {
    /// Derive segments connecting consecutive locations, defaulted to WALK.
    /// Fewer than two locations is a no-op: no segments, not confirmed.
    pub fn confirm(locations: &[Location]) -> Self {
        if locations.len() < 2 {
            return Self::default();
        }

        let segments = locations
            .windows(2)
            .map(|pair| RouteSegment {
                from_id: pair[0].id.clone(),
                to_id: pair[1].id.clone(),
                mode: TravelMode::Walk,
            })
            .collect();

        Self {
            segments,
            confirmed: true,
        }
    }

    /// Drop all segments and leave the confirmed state.
    pub fn invalidate(&mut self) {
        self.segments.clear();
        self.confirmed = false;
    }

    /// Drop every segment touching the deleted location and leave the
    /// confirmed state.
    pub fn prune_location(&mut self, location_id: &str) {
        self.segments
            .retain(|segment| !segment.references(location_id));
        self.confirmed = false;
    }

    /// Change one segment's travel mode. Does not touch the other segments
    /// or the confirmed flag.
    pub fn set_mode(&mut self, from_id: &str, to_id: &str, mode: TravelMode) -> Result<(), Error> {
        let segment = self
            .segments
            .iter_mut()
            .find(|segment| segment.from_id == from_id && segment.to_id == to_id)
            .ok_or_else(invalid_input_error)?;

        segment.mode = mode;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::LocationDraft;

    fn location(id: &str) -> Location {
        let mut location = Location::new(LocationDraft {
            name: format!("place {}", id),
            address: "somewhere".into(),
            latitude: 35.0,
            longitude: 139.0,
            visited_date: None,
            description: None,
            is_transit_station: false,
        });
        location.id = id.into();
        location
    }

    #[test]
    fn confirm_produces_consecutive_walk_segments() {
        let locations = vec![location("a"), location("b"), location("c")];

        let plan = RoutePlan::confirm(&locations);

        assert!(plan.confirmed);
        assert_eq!(plan.segments.len(), 2);
        assert_eq!(plan.segments[0].from_id, "a");
        assert_eq!(plan.segments[0].to_id, "b");
        assert_eq!(plan.segments[1].from_id, "b");
        assert_eq!(plan.segments[1].to_id, "c");
        assert!(plan
            .segments
            .iter()
            .all(|segment| segment.mode == TravelMode::Walk));
    }

    #[test]
    fn confirm_with_fewer_than_two_locations_is_a_no_op() {
        let plan = RoutePlan::confirm(&[location("a")]);

        assert!(!plan.confirmed);
        assert!(plan.segments.is_empty());

        let plan = RoutePlan::confirm(&[]);

        assert!(!plan.confirmed);
        assert!(plan.segments.is_empty());
    }

    #[test]
    fn invalidate_clears_segments_and_flag() {
        let mut plan = RoutePlan::confirm(&[location("a"), location("b")]);

        plan.invalidate();

        assert!(!plan.confirmed);
        assert!(plan.segments.is_empty());
    }

    #[test]
    fn prune_removes_segments_referencing_deleted_location() {
        let mut plan = RoutePlan::confirm(&[location("a"), location("b"), location("c")]);

        plan.prune_location("b");

        assert!(!plan.confirmed);
        assert!(plan.segments.is_empty());

        let mut plan = RoutePlan::confirm(&[location("a"), location("b"), location("c")]);

        plan.prune_location("c");

        assert!(!plan.confirmed);
        assert_eq!(plan.segments.len(), 1);
        assert_eq!(plan.segments[0].from_id, "a");
    }

    #[test]
    fn set_mode_updates_one_segment_and_keeps_confirmation() {
        let mut plan = RoutePlan::confirm(&[location("a"), location("b"), location("c")]);

        plan.set_mode("a", "b", TravelMode::Transit).unwrap();

        assert!(plan.confirmed);
        assert_eq!(plan.segments[0].mode, TravelMode::Transit);
        assert_eq!(plan.segments[1].mode, TravelMode::Walk);
    }

    #[test]
    fn set_mode_on_unknown_segment_fails() {
        let mut plan = RoutePlan::confirm(&[location("a"), location("b")]);

        assert!(plan.set_mode("b", "a", TravelMode::Drive).is_err());
    }
}
