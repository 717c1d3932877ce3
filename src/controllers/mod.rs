//! Controllers de la API
//!
//! Orquestación de requests: validación de DTOs, llamada al servicio o
//! repositorio correspondiente y armado de la respuesta.

pub mod booking_controller;
pub mod branch_controller;
pub mod extra_controller;
pub mod renter_controller;
pub mod vehicle_controller;
