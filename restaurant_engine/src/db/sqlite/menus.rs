use sqlx::SqliteConnection;

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{Menu, NewMenu},
};

pub async fn insert_menu(menu: NewMenu, conn: &mut SqliteConnection) -> Result<Menu, SqliteDatabaseError> {
    let menu = sqlx::query_as::<_, Menu>(
        r#"
            INSERT INTO menus (restaurant_id, name, description) VALUES ($1, $2, $3)
            RETURNING id, restaurant_id, name, description
        "#,
    )
    .bind(menu.restaurant_id)
    .bind(menu.name)
    .bind(menu.description)
    .fetch_one(conn)
    .await?;
    Ok(menu)
}

pub async fn fetch_menu(id: i64, conn: &mut SqliteConnection) -> Result<Option<Menu>, SqliteDatabaseError> {
    let menu = sqlx::query_as::<_, Menu>("SELECT id, restaurant_id, name, description FROM menus WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(menu)
}

pub async fn fetch_menus_for_restaurant(
    restaurant_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<Menu>, SqliteDatabaseError> {
    let menus = sqlx::query_as::<_, Menu>(
        "SELECT id, restaurant_id, name, description FROM menus WHERE restaurant_id = $1 ORDER BY id",
    )
    .bind(restaurant_id)
    .fetch_all(conn)
    .await?;
    Ok(menus)
}

pub async fn update_menu(
    id: i64,
    name: &str,
    description: Option<&str>,
    conn: &mut SqliteConnection,
) -> Result<Option<Menu>, SqliteDatabaseError> {
    let menu = sqlx::query_as::<_, Menu>(
        r#"
            UPDATE menus SET name = $1, description = COALESCE($2, description) WHERE id = $3
            RETURNING id, restaurant_id, name, description
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(menu)
}

pub async fn delete_menu(id: i64, conn: &mut SqliteConnection) -> Result<bool, SqliteDatabaseError> {
    let result = sqlx::query("DELETE FROM menus WHERE id = $1").bind(id).execute(conn).await?;
    Ok(result.rows_affected() > 0)
}
