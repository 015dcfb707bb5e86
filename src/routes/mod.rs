//! Routers de la API
//!
//! Cada entidad expone su propio `Router<AppState>`; los handlers delegan en
//! los servicios y la autorización se verifica al inicio de cada handler con
//! el permiso correspondiente.

pub mod auth_routes;
pub mod care_routes;
pub mod category_routes;
pub mod client_routes;
pub mod contract_routes;
pub mod dashboard_routes;
pub mod payment_routes;
pub mod role_routes;
pub mod sede_routes;
pub mod service_routes;
pub mod specimen_routes;
pub mod user_routes;
