use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::user::models::Login;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: PgRow) -> Result<User, UserError> {
    let id: i64 = row
        .try_get("id")
        .map_err(|e| UserError::Storage(e.to_string()))?;
    let login: String = row
        .try_get("login")
        .map_err(|e| UserError::Storage(e.to_string()))?;
    let password_hash: String = row
        .try_get("password_hash")
        .map_err(|e| UserError::Storage(e.to_string()))?;

    Ok(User {
        id: UserId::new(id)?,
        login: Login::new(login).map_err(|e| UserError::Storage(e.to_string()))?,
        password_hash,
    })
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (login, password_hash)
            VALUES ($1, $2)
            RETURNING id, login, password_hash
            "#,
        )
        .bind(user.login.as_str())
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    tracing::debug!(
                        table = db_err.table().unwrap_or("users"),
                        constraint = db_err.constraint().unwrap_or_default(),
                        "Conflict on unique index"
                    );
                    return UserError::LoginTaken(user.login.to_string());
                }
            }
            UserError::Storage(e.to_string())
        })?;

        user_from_row(row)
    }

    async fn find_by_login(&self, login: &Login) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT id, login, password_hash
            FROM users
            WHERE login = $1
            "#,
        )
        .bind(login.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::Storage(e.to_string()))?;

        row.map(user_from_row).transpose()
    }
}
