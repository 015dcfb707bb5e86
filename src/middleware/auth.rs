//! Gate de autenticación y autorización
//!
//! Dos verificaciones que el núcleo transaccional asume ya ejecutadas:
//!
//! 1. `auth_middleware`: extrae el token Bearer, lo verifica y deja el
//!    `Principal` en las extensiones del request (Unauthorized si falta o es
//!    inválido).
//! 2. `authorize`: resuelve el conjunto de permisos del rol del principal y
//!    admite o rechaza la operación (Forbidden). La resolución consulta la
//!    relación Role↔Permission en CADA chequeo: un cambio en los permisos de
//!    un rol aplica desde la siguiente verificación, sin caché.
//!
//! Los servicios de dominio no reciben principal ni hacen autorización.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::models::auth::Principal;
use crate::repositories::role_repository::RoleRepository;
use crate::services::auth_service::AuthService;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

/// Middleware de autenticación: token Bearer → Principal
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token requerido".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Formato de token incorrecto".to_string()))?;

    let auth_service = AuthService::new(
        state.pool.clone(),
        state.config.jwt_secret.clone(),
        state.config.jwt_expiration_hours,
    );

    let principal = auth_service.verify_token(token)?;
    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}

/// Verifica que el principal tenga el permiso requerido.
///
/// El rol debe existir y estar activo; el nombre del permiso debe aparecer
/// en su conjunto. La consulta se hace por request, nunca se cachea.
pub async fn authorize(
    state: &AppState,
    principal: &Principal,
    permission: &str,
) -> AppResult<()> {
    let roles = RoleRepository::new(state.pool.clone());

    let role = roles.find_by_id(principal.role_id).await?.ok_or_else(|| {
        AppError::Forbidden("Acceso denegado: usuario o rol no encontrado".to_string())
    })?;

    if !role.status {
        return Err(AppError::Forbidden(
            "Acceso denegado: el rol está inactivo".to_string(),
        ));
    }

    let permissions = roles.permission_names_of(principal.role_id).await?;

    if !permissions.iter().any(|p| p == permission) {
        return Err(AppError::Forbidden(format!(
            "Acceso denegado: se requiere el permiso '{}'",
            permission
        )));
    }

    Ok(())
}
