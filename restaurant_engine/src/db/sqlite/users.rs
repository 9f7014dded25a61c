use log::debug;
use sqlx::{QueryBuilder, SqliteConnection};

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{NewUser, UserAccount, UserUpdate},
};

const USER_COLUMNS: &str = "id, name, email, password_hash, role, created_at";

pub async fn insert_user(user: NewUser, conn: &mut SqliteConnection) -> Result<UserAccount, SqliteDatabaseError> {
    let account = sqlx::query_as::<_, UserAccount>(&format!(
        "INSERT INTO users (name, email, password_hash, role) VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
    ))
    .bind(user.name)
    .bind(user.email)
    .bind(user.password_hash)
    .bind(user.role)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Created user account #{} for {}", account.id, account.email);
    Ok(account)
}

pub async fn fetch_user_by_email(
    email: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<UserAccount>, SqliteDatabaseError> {
    let account = sqlx::query_as::<_, UserAccount>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
        .bind(email)
        .fetch_optional(conn)
        .await?;
    Ok(account)
}

pub async fn fetch_user_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<UserAccount>, SqliteDatabaseError> {
    let account = sqlx::query_as::<_, UserAccount>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(account)
}

/// Applies the non-empty fields of `update` to the user with the given id. Returns the updated record, or `None` if no
/// such user exists.
pub async fn update_user(
    id: i64,
    update: UserUpdate,
    conn: &mut SqliteConnection,
) -> Result<Option<UserAccount>, SqliteDatabaseError> {
    if update.is_empty() {
        return fetch_user_by_id(id, conn).await;
    }
    let mut builder = QueryBuilder::new("UPDATE users SET ");
    let mut set_clause = builder.separated(", ");
    if let Some(name) = update.name {
        set_clause.push("name = ");
        set_clause.push_bind_unseparated(name);
    }
    if let Some(email) = update.email {
        set_clause.push("email = ");
        set_clause.push_bind_unseparated(email);
    }
    if let Some(role) = update.role {
        set_clause.push("role = ");
        set_clause.push_bind_unseparated(role);
    }
    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(format!(" RETURNING {USER_COLUMNS}"));
    let account = builder.build_query_as::<UserAccount>().fetch_optional(conn).await?;
    Ok(account)
}

/// Returns `true` if a row was deleted.
pub async fn delete_user(id: i64, conn: &mut SqliteConnection) -> Result<bool, SqliteDatabaseError> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1").bind(id).execute(conn).await?;
    Ok(result.rows_affected() > 0)
}
