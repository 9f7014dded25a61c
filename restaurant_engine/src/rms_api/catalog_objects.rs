use serde::{Deserialize, Serialize};

use crate::db_types::Cents;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewRestaurantRequest {
    #[serde(default, alias = "nombre")]
    pub name: Option<String>,
    #[serde(default, alias = "direccion")]
    pub address: Option<String>,
    /// Used only when the caller's identity is not known.
    #[serde(default, alias = "id_admin")]
    pub admin_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRestaurantRequest {
    #[serde(default, alias = "nombre")]
    pub name: Option<String>,
    #[serde(default, alias = "direccion")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewMenuRequest {
    #[serde(default, alias = "id_restaurante")]
    pub restaurant_id: Option<i64>,
    #[serde(default, alias = "nombre")]
    pub name: Option<String>,
    #[serde(default, alias = "descripcion")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMenuRequest {
    #[serde(default, alias = "nombre")]
    pub name: Option<String>,
    #[serde(default, alias = "descripcion")]
    pub description: Option<String>,
}

/// Prices are given in cents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewProductRequest {
    #[serde(default, alias = "id_menu")]
    pub menu_id: Option<i64>,
    #[serde(default, alias = "nombre")]
    pub name: Option<String>,
    #[serde(default, alias = "precio")]
    pub price: Option<Cents>,
    #[serde(default, alias = "descripcion")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default, alias = "nombre")]
    pub name: Option<String>,
    #[serde(default, alias = "precio")]
    pub price: Option<Cents>,
    #[serde(default, alias = "descripcion")]
    pub description: Option<String>,
}
