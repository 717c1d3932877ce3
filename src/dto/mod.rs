//! DTOs de la API
//!
//! Formas de request/response desacopladas de los modelos de tabla.

pub mod booking_dto;
pub mod branch_dto;
pub mod common;
pub mod extra_dto;
pub mod renter_dto;
pub mod vehicle_dto;
