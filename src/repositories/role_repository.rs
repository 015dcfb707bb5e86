use crate::models::role::{Permission, Role};
use crate::utils::errors::AppError;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, AppError> {
        let role = sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(role)
    }

    pub async fn find_by_name(
        &self,
        name: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<Option<Role>, AppError> {
        let role = sqlx::query_as::<_, Role>(
            "SELECT * FROM roles WHERE name = $1 AND ($2::uuid IS NULL OR id <> $2)",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(role)
    }

    pub async fn list(&self, include_inactive: bool) -> Result<Vec<Role>, AppError> {
        let roles = sqlx::query_as::<_, Role>(
            r#"
            SELECT * FROM roles
            WHERE ($1 OR status = TRUE)
            ORDER BY name ASC
            "#,
        )
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await?;

        Ok(roles)
    }

    pub async fn set_status(&self, id: Uuid, status: bool) -> Result<Role, AppError> {
        let role = sqlx::query_as::<_, Role>(
            "UPDATE roles SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(role)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn count_users_with_role(&self, role_id: Uuid) -> Result<i64, AppError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE role_id = $1")
            .bind(role_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.0)
    }

    /// Nombres de los permisos del rol, resueltos en cada llamada
    /// (el conjunto puede cambiar y debe verse en el siguiente chequeo).
    pub async fn permission_names_of(&self, role_id: Uuid) -> Result<Vec<String>, AppError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT p.name FROM permissions p
            INNER JOIN role_permissions rp ON rp.permission_id = p.id
            WHERE rp.role_id = $1
            ORDER BY p.name ASC
            "#,
        )
        .bind(role_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    /// Resuelve nombres de permisos a filas de la tabla permissions.
    pub async fn find_permissions_by_names(
        &self,
        names: &[String],
    ) -> Result<Vec<Permission>, AppError> {
        let permissions = sqlx::query_as::<_, Permission>(
            "SELECT * FROM permissions WHERE name = ANY($1) ORDER BY name ASC",
        )
        .bind(names)
        .fetch_all(&self.pool)
        .await?;

        Ok(permissions)
    }

    pub async fn list_permissions(&self) -> Result<Vec<Permission>, AppError> {
        let permissions =
            sqlx::query_as::<_, Permission>("SELECT * FROM permissions ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(permissions)
    }

    pub async fn create_in(
        conn: &mut PgConnection,
        name: String,
        status: bool,
    ) -> Result<Role, sqlx::Error> {
        sqlx::query_as::<_, Role>(
            r#"
            INSERT INTO roles (id, name, status)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(status)
        .fetch_one(conn)
        .await
    }

    pub async fn update_name_in(
        conn: &mut PgConnection,
        id: Uuid,
        name: String,
    ) -> Result<Role, sqlx::Error> {
        sqlx::query_as::<_, Role>(
            "UPDATE roles SET name = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_one(conn)
        .await
    }

    /// Reemplaza el conjunto completo de permisos del rol.
    pub async fn set_permissions_in(
        conn: &mut PgConnection,
        role_id: Uuid,
        permission_ids: &[Uuid],
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM role_permissions WHERE role_id = $1")
            .bind(role_id)
            .execute(&mut *conn)
            .await?;

        for permission_id in permission_ids {
            sqlx::query("INSERT INTO role_permissions (role_id, permission_id) VALUES ($1, $2)")
                .bind(role_id)
                .bind(permission_id)
                .execute(&mut *conn)
                .await?;
        }

        Ok(())
    }
}
