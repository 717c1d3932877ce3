//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod booking;
pub mod branch;
pub mod extra;
pub mod payment;
pub mod renter;
pub mod vehicle;
