//! PostgreSQL user repository implementation
//!
//! Users are stored as flat `{id, name, email, username}` records in a
//! single `users` collection. Uniqueness of email and username is enforced
//! by two unique indexes; they are the authority when concurrent creates
//! slip past the service's existence checks.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::domain::user::{normalize_identifier, User, UserId, UserRepository};
use crate::domain::DomainError;

const EMAIL_INDEX: &str = "users_email_key";
const USERNAME_INDEX: &str = "users_username_key";

/// Stored shape of a user, mapped one-to-one onto the aggregate
#[derive(Debug, Clone, sqlx::FromRow)]
struct UserDocument {
    id: String,
    name: String,
    email: String,
    username: String,
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        User::restore(UserId::from(doc.id), doc.name, doc.email, doc.username)
    }
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().as_str().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            username: user.username().to_string(),
        }
    }
}

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a repository and make sure the collection and its unique
    /// indexes exist
    pub async fn new(pool: PgPool) -> Result<Self, DomainError> {
        let repository = Self { pool };
        repository.ensure_schema().await?;
        Ok(repository)
    }

    async fn ensure_schema(&self) -> Result<(), DomainError> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                username TEXT NOT NULL
            )
            "#
            .to_string(),
            format!("CREATE UNIQUE INDEX IF NOT EXISTS {EMAIL_INDEX} ON users (email)"),
            format!("CREATE UNIQUE INDEX IF NOT EXISTS {USERNAME_INDEX} ON users (username)"),
        ];

        for statement in &statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| DomainError::storage(format!("Failed to create users schema: {}", e)))?;
        }

        info!("Users collection and unique indexes ready");
        Ok(())
    }

    async fn find_one(
        &self,
        sql: &str,
        key: &str,
        context: &str,
        not_found: String,
    ) -> Result<User, DomainError> {
        let doc: Option<UserDocument> = sqlx::query_as(sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to {}: {}", context, e)))?;

        doc.map(User::from)
            .ok_or_else(|| DomainError::not_found(not_found))
    }

    async fn count_where(&self, sql: &str, key: &str, context: &str) -> Result<bool, DomainError> {
        let count: i64 = sqlx::query_scalar(sql)
            .bind(key)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to {}: {}", context, e)))?;

        Ok(count > 0)
    }
}

/// Map a write error, turning unique-index violations into conflicts
fn map_write_error(err: sqlx::Error, user: &User, context: &str) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            debug!(constraint = ?db_err.constraint(), "Unique index rejected write");
            return classify_unique_violation(db_err.constraint(), user);
        }
    }

    DomainError::storage(format!("Failed to {}: {}", context, err))
}

/// The username index yields `UsernameExists`; the email index, or any
/// unique violation that does not name its index, yields `EmailExists`
fn classify_unique_violation(constraint: Option<&str>, user: &User) -> DomainError {
    match constraint {
        Some(USERNAME_INDEX) => DomainError::username_exists(user.username()),
        _ => DomainError::email_exists(user.email()),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let doc = UserDocument::from(user);

        sqlx::query("INSERT INTO users (id, name, email, username) VALUES ($1, $2, $3, $4)")
            .bind(&doc.id)
            .bind(&doc.name)
            .bind(&doc.email)
            .bind(&doc.username)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, user, "save user"))?;

        Ok(())
    }

    async fn get_by_id(&self, id: &UserId) -> Result<User, DomainError> {
        self.find_one(
            "SELECT id, name, email, username FROM users WHERE id = $1",
            id.as_str(),
            "get user by ID",
            format!("User '{}' not found", id),
        )
        .await
    }

    async fn get_by_email(&self, email: &str) -> Result<User, DomainError> {
        let email = normalize_identifier(email);
        self.find_one(
            "SELECT id, name, email, username FROM users WHERE email = $1",
            &email,
            "get user by email",
            format!("User with email '{}' not found", email),
        )
        .await
    }

    async fn get_by_username(&self, username: &str) -> Result<User, DomainError> {
        let username = normalize_identifier(username);
        self.find_one(
            "SELECT id, name, email, username FROM users WHERE username = $1",
            &username,
            "get user by username",
            format!("User with username '{}' not found", username),
        )
        .await
    }

    async fn get_all(&self) -> Result<Vec<User>, DomainError> {
        let docs: Vec<UserDocument> = sqlx::query_as("SELECT id, name, email, username FROM users")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get all users: {}", e)))?;

        Ok(docs.into_iter().map(User::from).collect())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let doc = UserDocument::from(user);

        let result =
            sqlx::query("UPDATE users SET name = $2, email = $3, username = $4 WHERE id = $1")
                .bind(&doc.id)
                .bind(&doc.name)
                .bind(&doc.email)
                .bind(&doc.username)
                .execute(&self.pool)
                .await
                .map_err(|e| map_write_error(e, user, "update user"))?;

        // An UPDATE matching no row succeeds with zero rows affected
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                user.id()
            )));
        }

        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete user: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!("User '{}' not found", id)));
        }

        Ok(())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        self.count_where(
            "SELECT COUNT(*) FROM users WHERE email = $1",
            &normalize_identifier(email),
            "check email existence",
        )
        .await
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        self.count_where(
            "SELECT COUNT(*) FROM users WHERE username = $1",
            &normalize_identifier(username),
            "check username existence",
        )
        .await
    }
}
