//! Servicio de autenticación
//!
//! Emite y verifica los tokens JWT que consume el gate de autorización. Las
//! operaciones de dominio nunca ven tokens: el middleware convierte el token
//! en un `Principal` y los permisos se resuelven aparte, por request.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use crate::models::auth::{Claims, LoginRequest, LoginResponse, Principal};
use crate::models::user::User;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{AppError, AppResult};

pub struct AuthService {
    users: UserRepository,
    jwt_secret: String,
    jwt_expiration_hours: i64,
}

impl AuthService {
    pub fn new(pool: PgPool, jwt_secret: String, jwt_expiration_hours: i64) -> Self {
        Self {
            users: UserRepository::new(pool),
            jwt_secret,
            jwt_expiration_hours,
        }
    }

    /// Autentica credenciales y emite un token JWT.
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        request.validate()?;

        let user = self
            .users
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        if !user.status {
            return Err(AppError::Unauthorized(
                "El usuario está inactivo".to_string(),
            ));
        }

        let valid = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Error verificando credenciales: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        let token = self.issue_token(&user)?;
        info!("Usuario {} autenticado", user.username);

        Ok(LoginResponse {
            token,
            user: user.into(),
        })
    }

    /// Genera el token firmado para un usuario.
    pub fn issue_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            role_id: user.role_id,
            username: user.username.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.jwt_expiration_hours)).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Error generando token: {}", e)))
    }

    /// Verifica un token y devuelve el principal autenticado.
    pub fn verify_token(&self, token: &str) -> AppResult<Principal> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                AppError::Unauthorized("Token expirado".to_string())
            }
            _ => AppError::Unauthorized("Token inválido".to_string()),
        })?;

        Ok(Principal {
            user_id: data.claims.sub,
            role_id: data.claims.role_id,
            username: data.claims.username,
        })
    }
}
