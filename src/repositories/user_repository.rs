use crate::models::user::User;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        full_name: String,
        document: String,
        email: String,
        phone: Option<String>,
        username: String,
        password_hash: String,
        role_id: Uuid,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, full_name, document, email, phone, username, password_hash, role_id, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(full_name)
        .bind(document)
        .bind(email)
        .bind(phone)
        .bind(username)
        .bind(password_hash)
        .bind(role_id)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    pub async fn update(
        &self,
        id: Uuid,
        full_name: String,
        email: String,
        phone: Option<String>,
        role_id: Uuid,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET full_name = $2, email = $3, phone = $4, role_id = $5, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(full_name)
        .bind(email)
        .bind(phone)
        .bind(role_id)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn set_status(&self, id: Uuid, status: bool) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}
