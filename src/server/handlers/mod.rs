pub mod durations;
pub mod locations;
pub mod places;
pub mod proxy;
pub mod routes;
