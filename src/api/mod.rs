mod interface;

pub use interface::{DurationAPI, DynAPI, LocationAPI, PlaceAPI, RoutePlanAPI, API};
