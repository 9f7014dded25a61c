use sqlx::{QueryBuilder, SqliteConnection};

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{NewReservation, Reservation, ReservationStatus, ReservationUpdate},
};

const RESERVATION_COLUMNS: &str = "id, customer_id, restaurant_id, reserved_for, party_size, status, created_at";

pub async fn insert_reservation(
    reservation: NewReservation,
    conn: &mut SqliteConnection,
) -> Result<Reservation, SqliteDatabaseError> {
    let reservation = sqlx::query_as::<_, Reservation>(&format!(
        r#"
            INSERT INTO reservations (customer_id, restaurant_id, reserved_for, party_size, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {RESERVATION_COLUMNS}
        "#
    ))
    .bind(reservation.customer_id)
    .bind(reservation.restaurant_id)
    .bind(reservation.reserved_for)
    .bind(reservation.party_size)
    .bind(ReservationStatus::Pending)
    .fetch_one(conn)
    .await?;
    Ok(reservation)
}

pub async fn fetch_reservations(conn: &mut SqliteConnection) -> Result<Vec<Reservation>, SqliteDatabaseError> {
    let reservations =
        sqlx::query_as::<_, Reservation>(&format!("SELECT {RESERVATION_COLUMNS} FROM reservations ORDER BY id"))
            .fetch_all(conn)
            .await?;
    Ok(reservations)
}

pub async fn fetch_reservation(id: i64, conn: &mut SqliteConnection) -> Result<Option<Reservation>, SqliteDatabaseError> {
    let reservation =
        sqlx::query_as::<_, Reservation>(&format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = $1"))
            .bind(id)
            .fetch_optional(conn)
            .await?;
    Ok(reservation)
}

pub async fn update_reservation(
    id: i64,
    update: ReservationUpdate,
    conn: &mut SqliteConnection,
) -> Result<Option<Reservation>, SqliteDatabaseError> {
    if update.is_empty() {
        return fetch_reservation(id, conn).await;
    }
    let mut builder = QueryBuilder::new("UPDATE reservations SET ");
    let mut set_clause = builder.separated(", ");
    if let Some(reserved_for) = update.reserved_for {
        set_clause.push("reserved_for = ");
        set_clause.push_bind_unseparated(reserved_for);
    }
    if let Some(party_size) = update.party_size {
        set_clause.push("party_size = ");
        set_clause.push_bind_unseparated(party_size);
    }
    if let Some(status) = update.status {
        set_clause.push("status = ");
        set_clause.push_bind_unseparated(status);
    }
    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(format!(" RETURNING {RESERVATION_COLUMNS}"));
    let reservation = builder.build_query_as::<Reservation>().fetch_optional(conn).await?;
    Ok(reservation)
}

pub async fn delete_reservation(id: i64, conn: &mut SqliteConnection) -> Result<bool, SqliteDatabaseError> {
    let result = sqlx::query("DELETE FROM reservations WHERE id = $1").bind(id).execute(conn).await?;
    Ok(result.rows_affected() > 0)
}
