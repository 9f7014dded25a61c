use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
pub use rms_common::Cents;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("Invalid value: {0}")]
pub struct ConversionError(pub String);

//--------------------------------------        Role         ---------------------------------------------------------
/// The role of a principal. Legacy Spanish spellings are accepted when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[serde(alias = "cliente")]
    Customer,
    #[serde(alias = "administrador")]
    Administrator,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Customer => write!(f, "customer"),
            Role::Administrator => write!(f, "administrator"),
        }
    }
}

impl FromStr for Role {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "customer" | "cliente" => Ok(Self::Customer),
            "administrator" | "administrador" => Ok(Self::Administrator),
            s => Err(ConversionError(format!("The role must be 'customer' or 'administrator', not '{s}'"))),
        }
    }
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Administrator)
    }
}

//--------------------------------------       Actor         ---------------------------------------------------------
/// The authenticated principal on whose behalf an operation is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: i64,
    pub role: Role,
}

impl Actor {
    pub fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

//--------------------------------------    UserAccount      ---------------------------------------------------------
/// A row from the credential store. This type carries the password hash and must never be serialized to clients. Use
/// [`UserAccount::public`] for that.
#[derive(Debug, Clone, FromRow)]
pub struct UserAccount {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    pub fn public(&self) -> User {
        User {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            created_at: self.created_at,
        }
    }
}

/// The public projection of a principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.role.is_none()
    }
}

//--------------------------------------     Restaurant      ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub admin_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewRestaurant {
    pub name: String,
    pub address: String,
    pub admin_id: i64,
}

//--------------------------------------        Menu         ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Menu {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewMenu {
    pub restaurant_id: i64,
    pub name: String,
    pub description: Option<String>,
}

//--------------------------------------       Product       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub menu_id: i64,
    pub name: String,
    /// The authoritative unit price. Changing it never affects order lines that have already been placed.
    pub price: Cents,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub menu_id: i64,
    pub name: String,
    pub price: Cents,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Cents>,
    pub description: Option<String>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.description.is_none()
    }
}

//--------------------------------------   FulfillmentType   ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum FulfillmentType {
    #[sqlx(rename = "en restaurante")]
    #[serde(rename = "en restaurante")]
    DineIn,
    #[sqlx(rename = "para recoger")]
    #[serde(rename = "para recoger")]
    Takeout,
}

impl Display for FulfillmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FulfillmentType::DineIn => write!(f, "en restaurante"),
            FulfillmentType::Takeout => write!(f, "para recoger"),
        }
    }
}

impl FromStr for FulfillmentType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en restaurante" => Ok(Self::DineIn),
            "para recoger" => Ok(Self::Takeout),
            s => Err(ConversionError(format!(
                "Invalid order type '{s}'. It must be 'en restaurante' or 'para recoger'"
            ))),
        }
    }
}

//--------------------------------------   OrderStatusType   ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum OrderStatusType {
    /// The order has been placed and is waiting for the restaurant.
    #[sqlx(rename = "pendiente")]
    #[serde(rename = "pendiente")]
    Pending,
    /// The restaurant has accepted the order.
    #[sqlx(rename = "confirmado")]
    #[serde(rename = "confirmado")]
    Confirmed,
}

impl Display for OrderStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatusType::Pending => write!(f, "pendiente"),
            OrderStatusType::Confirmed => write!(f, "confirmado"),
        }
    }
}

impl FromStr for OrderStatusType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pendiente" => Ok(Self::Pending),
            "confirmado" => Ok(Self::Confirmed),
            s => Err(ConversionError(format!("Invalid order status: {s}"))),
        }
    }
}

//--------------------------------------        Order        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub restaurant_id: i64,
    #[serde(rename = "type")]
    pub fulfillment: FulfillmentType,
    pub status: OrderStatusType,
    pub created_at: DateTime<Utc>,
}

/// A validated order, ready to be written to the ledger. Build one with
/// [`crate::rms_api::OrderRequest::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer_id: i64,
    pub restaurant_id: i64,
    pub fulfillment: FulfillmentType,
    /// Never empty.
    pub lines: Vec<NewOrderLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderLine {
    pub product_id: i64,
    /// Always at least 1.
    pub quantity: i64,
}

//--------------------------------------      OrderLine      ---------------------------------------------------------
/// An order line joined with its product name, as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct OrderLineDetail {
    pub product_id: i64,
    pub name: String,
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    pub subtotal: Cents,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderWithLines {
    pub order: Order,
    pub products: Vec<OrderLineDetail>,
}

impl OrderWithLines {
    pub fn total(&self) -> Cents {
        self.products.iter().map(|l| l.subtotal).sum()
    }
}

//--------------------------------------  ReservationStatus  ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum ReservationStatus {
    #[sqlx(rename = "pendiente")]
    #[serde(rename = "pendiente")]
    Pending,
    #[sqlx(rename = "confirmada")]
    #[serde(rename = "confirmada")]
    Confirmed,
    #[sqlx(rename = "cancelada")]
    #[serde(rename = "cancelada")]
    Cancelled,
}

impl Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReservationStatus::Pending => write!(f, "pendiente"),
            ReservationStatus::Confirmed => write!(f, "confirmada"),
            ReservationStatus::Cancelled => write!(f, "cancelada"),
        }
    }
}

impl FromStr for ReservationStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pendiente" => Ok(Self::Pending),
            "confirmada" => Ok(Self::Confirmed),
            "cancelada" => Ok(Self::Cancelled),
            s => Err(ConversionError(format!("Invalid reservation status: {s}"))),
        }
    }
}

//--------------------------------------     Reservation     ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub customer_id: i64,
    pub restaurant_id: i64,
    pub reserved_for: DateTime<Utc>,
    pub party_size: i64,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReservation {
    pub customer_id: i64,
    pub restaurant_id: i64,
    pub reserved_for: DateTime<Utc>,
    pub party_size: i64,
}

#[derive(Debug, Clone, Default)]
pub struct ReservationUpdate {
    pub reserved_for: Option<DateTime<Utc>>,
    pub party_size: Option<i64>,
    pub status: Option<ReservationStatus>,
}

impl ReservationUpdate {
    pub fn is_empty(&self) -> bool {
        self.reserved_for.is_none() && self.party_size.is_none() && self.status.is_none()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn roles_accept_legacy_spellings() {
        assert_eq!("cliente".parse::<Role>().unwrap(), Role::Customer);
        assert_eq!("administrator".parse::<Role>().unwrap(), Role::Administrator);
        assert!("superuser".parse::<Role>().is_err());
        let role: Role = serde_json::from_str(r#""administrador""#).unwrap();
        assert_eq!(role, Role::Administrator);
        assert_eq!(serde_json::to_string(&Role::Customer).unwrap(), r#""customer""#);
    }

    #[test]
    fn fulfillment_types() {
        assert_eq!("en restaurante".parse::<FulfillmentType>().unwrap(), FulfillmentType::DineIn);
        assert_eq!("para recoger".parse::<FulfillmentType>().unwrap(), FulfillmentType::Takeout);
        let err = "delivery".parse::<FulfillmentType>().unwrap_err();
        assert!(err.to_string().contains("delivery"));
    }

    #[test]
    fn order_lines_serialize_with_legacy_quantity_name() {
        let line = OrderLineDetail { product_id: 4, name: "Tacos".into(), quantity: 2, subtotal: Cents::from(2598) };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["cantidad"], 2);
        assert_eq!(json["subtotal"], 2598);
        assert_eq!(json["name"], "Tacos");
    }
}
