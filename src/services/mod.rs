//! Servicios de dominio
//!
//! Lógica de negocio del motor de reservas: cálculo de precios,
//! disponibilidad, máquina de estados y el orquestador transaccional.

pub mod availability_service;
pub mod booking_service;
pub mod lifecycle_service;
pub mod pricing_service;

pub use booking_service::BookingService;
