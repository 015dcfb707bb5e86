//! Módulo de base de datos

pub mod connection;

pub use connection::create_pool;
