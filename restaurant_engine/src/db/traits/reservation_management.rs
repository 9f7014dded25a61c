use crate::{
    db_types::{NewReservation, Reservation, ReservationUpdate},
    rms_api::ReservationApiError,
};

#[allow(async_fn_in_trait)]
pub trait ReservationManagement {
    /// Fails with [`ReservationApiError::RestaurantNotFound`] if the restaurant does not exist.
    async fn create_reservation(&self, reservation: NewReservation) -> Result<Reservation, ReservationApiError>;

    async fn fetch_reservations(&self) -> Result<Vec<Reservation>, ReservationApiError>;

    async fn fetch_reservation(&self, id: i64) -> Result<Option<Reservation>, ReservationApiError>;

    async fn update_reservation(
        &self,
        id: i64,
        update: ReservationUpdate,
    ) -> Result<Option<Reservation>, ReservationApiError>;

    async fn delete_reservation(&self, id: i64) -> Result<bool, ReservationApiError>;
}
