use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewReservationRequest {
    #[serde(default, alias = "id_restaurante")]
    pub restaurant_id: Option<i64>,
    /// Used only when the caller's identity is not known.
    #[serde(default, alias = "id_usuario")]
    pub user_id: Option<i64>,
    #[serde(default, alias = "fecha_hora")]
    pub reserved_for: Option<DateTime<Utc>>,
    #[serde(default, alias = "guests", alias = "personas")]
    pub party_size: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateReservationRequest {
    #[serde(default, alias = "fecha_hora")]
    pub reserved_for: Option<DateTime<Utc>>,
    #[serde(default, alias = "guests", alias = "personas")]
    pub party_size: Option<i64>,
    #[serde(default, alias = "estado")]
    pub status: Option<String>,
}
