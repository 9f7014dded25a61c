use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{NewRestaurant, Restaurant},
};

pub async fn insert_restaurant(
    restaurant: NewRestaurant,
    conn: &mut SqliteConnection,
) -> Result<Restaurant, SqliteDatabaseError> {
    let restaurant = sqlx::query_as::<_, Restaurant>(
        "INSERT INTO restaurants (name, address, admin_id) VALUES ($1, $2, $3) RETURNING id, name, address, admin_id",
    )
    .bind(restaurant.name)
    .bind(restaurant.address)
    .bind(restaurant.admin_id)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Restaurant #{} ({}) created", restaurant.id, restaurant.name);
    Ok(restaurant)
}

pub async fn fetch_restaurants(conn: &mut SqliteConnection) -> Result<Vec<Restaurant>, SqliteDatabaseError> {
    let restaurants =
        sqlx::query_as::<_, Restaurant>("SELECT id, name, address, admin_id FROM restaurants ORDER BY id")
            .fetch_all(conn)
            .await?;
    Ok(restaurants)
}

pub async fn fetch_restaurant(id: i64, conn: &mut SqliteConnection) -> Result<Option<Restaurant>, SqliteDatabaseError> {
    let restaurant = sqlx::query_as::<_, Restaurant>("SELECT id, name, address, admin_id FROM restaurants WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(restaurant)
}

pub async fn update_restaurant(
    id: i64,
    name: &str,
    address: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Restaurant>, SqliteDatabaseError> {
    let restaurant = sqlx::query_as::<_, Restaurant>(
        "UPDATE restaurants SET name = $1, address = $2 WHERE id = $3 RETURNING id, name, address, admin_id",
    )
    .bind(name)
    .bind(address)
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(restaurant)
}

pub async fn delete_restaurant(id: i64, conn: &mut SqliteConnection) -> Result<bool, SqliteDatabaseError> {
    let result = sqlx::query("DELETE FROM restaurants WHERE id = $1").bind(id).execute(conn).await?;
    Ok(result.rows_affected() > 0)
}
