//! Back-office de alquiler de vehículos
//!
//! El núcleo es el motor de reservas: decide si un vehículo puede
//! alquilarse en un intervalo, calcula su precio y conduce la reserva por
//! un ciclo de vida cuyas transiciones tienen efectos sobre la
//! disponibilidad del vehículo.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
