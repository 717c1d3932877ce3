//! Routers de la API
//!
//! Un módulo de rutas por entidad; `create_api_router` arma el árbol
//! completo bajo /api para main y para los tests de router.

use axum::Router;

use crate::state::AppState;

pub mod booking_routes;
pub mod branch_routes;
pub mod extra_routes;
pub mod renter_routes;
pub mod vehicle_routes;

pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/api/booking", booking_routes::create_booking_router())
        .nest("/api/vehicle", vehicle_routes::create_vehicle_router())
        .nest("/api/branch", branch_routes::create_branch_router())
        .nest("/api/renter", renter_routes::create_renter_router())
        .nest("/api/extra", extra_routes::create_extra_router())
}
