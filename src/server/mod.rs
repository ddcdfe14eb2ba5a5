mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{delete, get, patch, post},
    Router,
};

use crate::api::API;
use crate::server::handlers::{durations, locations, places, proxy, routes};

pub type DynAPI = Arc<dyn API + Send + Sync>;

pub async fn serve<T: API + Sync + Send + 'static>(api: T) {
    tracing_subscriber::fmt::init();

    let api = Arc::new(api) as DynAPI;

    let app = Router::new()
        .route("/locations", get(locations::list).post(locations::create))
        .route("/locations/reorder", patch(locations::reorder))
        .route("/locations/:id", delete(locations::remove))
        .route("/route", get(routes::find))
        .route("/route/confirm", post(routes::confirm))
        .route("/route/segments/mode", patch(routes::set_mode))
        .route(
            "/route/durations",
            get(durations::find).post(durations::compute),
        )
        .route("/places/suggestions", get(places::list_suggestions))
        .route("/places/:id", get(places::resolve))
        .route("/odpt", get(proxy::odpt))
        .route("/routes_api/smoke", get(proxy::routes_smoke))
        .layer(Extension(api));

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
