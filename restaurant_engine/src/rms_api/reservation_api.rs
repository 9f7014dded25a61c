use std::fmt::Debug;

use log::*;

use crate::{
    db::traits::ReservationManagement,
    db_types::{NewReservation, Reservation, ReservationStatus, ReservationUpdate},
    rms_api::{
        reservation_objects::{NewReservationRequest, UpdateReservationRequest},
        ReservationApiError,
    },
};

pub struct ReservationApi<B> {
    db: B,
}

impl<B: Debug> Debug for ReservationApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReservationApi ({:?})", self.db)
    }
}

impl<B> ReservationApi<B>
where B: ReservationManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn reservations(&self) -> Result<Vec<Reservation>, ReservationApiError> {
        self.db.fetch_reservations().await
    }

    pub async fn reservation(&self, id: i64) -> Result<Reservation, ReservationApiError> {
        self.db.fetch_reservation(id).await?.ok_or(ReservationApiError::ReservationNotFound(id))
    }

    /// Books a table. The customer is `customer` when the caller is authenticated, otherwise the request's `user_id`.
    pub async fn create_reservation(
        &self,
        customer: Option<i64>,
        request: NewReservationRequest,
    ) -> Result<Reservation, ReservationApiError> {
        let (Some(customer_id), Some(restaurant_id), Some(reserved_for), Some(party_size)) =
            (customer.or(request.user_id), request.restaurant_id, request.reserved_for, request.party_size)
        else {
            return Err(ReservationApiError::ValidationError(
                "restaurant_id, user_id, reserved_for and party_size are required".into(),
            ));
        };
        validate_party_size(party_size)?;
        let reservation = self
            .db
            .create_reservation(NewReservation { customer_id, restaurant_id, reserved_for, party_size })
            .await?;
        info!("📅️ Reservation #{} for {party_size} at restaurant #{restaurant_id} created", reservation.id);
        Ok(reservation)
    }

    pub async fn update_reservation(
        &self,
        id: i64,
        request: UpdateReservationRequest,
    ) -> Result<Reservation, ReservationApiError> {
        let status = match request.status {
            Some(s) => {
                Some(s.trim().parse::<ReservationStatus>().map_err(|e| ReservationApiError::ValidationError(e.to_string()))?)
            },
            None => None,
        };
        let update = ReservationUpdate { reserved_for: request.reserved_for, party_size: request.party_size, status };
        if update.is_empty() {
            return Err(ReservationApiError::ValidationError(
                "at least one of reserved_for, party_size or status is required".into(),
            ));
        }
        if let Some(size) = update.party_size {
            validate_party_size(size)?;
        }
        self.db.update_reservation(id, update).await?.ok_or(ReservationApiError::ReservationNotFound(id))
    }

    pub async fn delete_reservation(&self, id: i64) -> Result<(), ReservationApiError> {
        if !self.db.delete_reservation(id).await? {
            return Err(ReservationApiError::ReservationNotFound(id));
        }
        debug!("📅️ Reservation #{id} deleted");
        Ok(())
    }
}

fn validate_party_size(size: i64) -> Result<(), ReservationApiError> {
    if size < 1 {
        return Err(ReservationApiError::ValidationError(format!("The party size must be at least 1, not {size}")));
    }
    Ok(())
}
