//! Servicio de cotización de delivery
//!
//! Dado un par de coordenadas del cliente, calcula la distancia por
//! carretera al hub de despacho más cercano vía OpenRouteService,
//! aplica la tabla de tarifas y cachea las distancias en memoria.

pub mod cache;
pub mod clients;
pub mod config;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
