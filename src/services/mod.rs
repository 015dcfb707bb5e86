//! Services module
//!
//! Este módulo contiene la lógica de negocio y servicios de la aplicación.
//! Los servicios encapsulan las operaciones transaccionales que involucran
//! múltiples entidades (contratos, ejemplares y contadores derivados).

pub mod auth_service;
pub mod care_service;
pub mod client_service;
pub mod contract_service;
pub mod dashboard_service;
pub mod payment_service;
pub mod role_service;
pub mod sede_service;
pub mod service_service;
pub mod specimen_category_service;
pub mod specimen_service;
pub mod user_service;
