use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,          // store-assigned, never reused
    pub email: String,    // validated before create/update
    pub password: String, // Argon2 hash, never plaintext
}

/// List every user. No pagination, no filtering.
pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password
        FROM users
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(users)
}

pub async fn find_by_id(db: &PgPool, id: i32) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(user)
}

/// Create a new user with hashed password. The store assigns the id.
pub async fn create(db: &PgPool, email: &str, password_hash: &str) -> anyhow::Result<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, password)
        VALUES ($1, $2)
        RETURNING id, email, password
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .fetch_one(db)
    .await?;
    Ok(user)
}

/// Replace email and password hash for an existing user.
pub async fn update_by_id(
    db: &PgPool,
    id: i32,
    email: &str,
    password_hash: &str,
) -> anyhow::Result<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET email = $2, password = $3
        WHERE id = $1
        RETURNING id, email, password
        "#,
    )
    .bind(id)
    .bind(email)
    .bind(password_hash)
    .fetch_one(db)
    .await?;
    Ok(user)
}

pub async fn update_email(db: &PgPool, id: i32, email: &str) -> anyhow::Result<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET email = $2
        WHERE id = $1
        RETURNING id, email, password
        "#,
    )
    .bind(id)
    .bind(email)
    .fetch_one(db)
    .await?;
    Ok(user)
}

pub async fn delete_by_id(db: &PgPool, id: i32) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        DELETE FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(db)
    .await?;
    Ok(())
}
