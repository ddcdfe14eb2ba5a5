pub mod google_places;
pub mod google_routes;
