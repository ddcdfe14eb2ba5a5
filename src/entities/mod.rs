mod duration;
mod location;
mod route_plan;
mod segment;

pub use duration::{DurationBoard, RouteDurations, SegmentDuration, ANOMALOUS_DURATION_SECS};
pub use location::{Coordinates, Location, LocationDraft};
pub use route_plan::RoutePlan;
pub use segment::{RouteSegment, TravelMode};
