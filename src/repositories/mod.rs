//! Repositorios de acceso a datos
//!
//! Un struct por tabla envolviendo el pool de PostgreSQL. Las operaciones
//! que pertenecen a una sección crítica reciben la conexión de la
//! transacción del llamador en lugar del pool.

pub mod booking_repository;
pub mod branch_repository;
pub mod extra_repository;
pub mod payment_repository;
pub mod renter_repository;
pub mod vehicle_repository;
