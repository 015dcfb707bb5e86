//! Backend de gestión del criadero
//!
//! Núcleo transaccional (clientes, ejemplares, contratos, pagos, registros
//! de cuidado) detrás de un gate de roles y permisos. Los módulos se exponen
//! como biblioteca para los tests de integración; el binario vive en main.rs.

pub mod config;
pub mod database;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
