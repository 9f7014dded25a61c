//! Restaurants, their menus, and the products on those menus.
use std::fmt::Debug;

use log::*;

use crate::{
    db::traits::CatalogManagement,
    db_types::{Cents, Menu, NewMenu, NewProduct, NewRestaurant, Product, ProductUpdate, Restaurant},
    rms_api::{
        catalog_objects::{
            NewMenuRequest,
            NewProductRequest,
            NewRestaurantRequest,
            UpdateMenuRequest,
            UpdateProductRequest,
            UpdateRestaurantRequest,
        },
        non_blank,
        CatalogApiError,
    },
};

pub struct CatalogApi<B> {
    db: B,
}

impl<B: Debug> Debug for CatalogApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CatalogApi ({:?})", self.db)
    }
}

impl<B> CatalogApi<B>
where B: CatalogManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    //------------------------------------------   Restaurants   ------------------------------------------------------

    pub async fn restaurants(&self) -> Result<Vec<Restaurant>, CatalogApiError> {
        self.db.fetch_restaurants().await
    }

    pub async fn restaurant(&self, id: i64) -> Result<Restaurant, CatalogApiError> {
        self.db.fetch_restaurant(id).await?.ok_or(CatalogApiError::RestaurantNotFound(id))
    }

    /// Creates a restaurant. The administrator is `admin` when the caller is authenticated, otherwise the `admin_id`
    /// given in the request. The administrator id is not checked against the credential store.
    pub async fn create_restaurant(
        &self,
        admin: Option<i64>,
        request: NewRestaurantRequest,
    ) -> Result<Restaurant, CatalogApiError> {
        let admin_id = admin
            .or(request.admin_id)
            .ok_or_else(|| CatalogApiError::ValidationError("A valid admin_id is required".into()))?;
        let (Some(name), Some(address)) = (non_blank(request.name), non_blank(request.address)) else {
            return Err(CatalogApiError::ValidationError("name and address are required".into()));
        };
        let restaurant = self.db.create_restaurant(NewRestaurant { name, address, admin_id }).await?;
        info!("🍽️ Restaurant #{} created for administrator #{admin_id}", restaurant.id);
        Ok(restaurant)
    }

    pub async fn update_restaurant(
        &self,
        id: i64,
        request: UpdateRestaurantRequest,
    ) -> Result<Restaurant, CatalogApiError> {
        let (Some(name), Some(address)) = (non_blank(request.name), non_blank(request.address)) else {
            return Err(CatalogApiError::ValidationError("name and address are required".into()));
        };
        self.db.update_restaurant(id, &name, &address).await?.ok_or(CatalogApiError::RestaurantNotFound(id))
    }

    pub async fn delete_restaurant(&self, id: i64) -> Result<(), CatalogApiError> {
        if !self.db.delete_restaurant(id).await? {
            return Err(CatalogApiError::RestaurantNotFound(id));
        }
        info!("🍽️ Restaurant #{id} deleted");
        Ok(())
    }

    //------------------------------------------      Menus      ------------------------------------------------------

    pub async fn menu(&self, id: i64) -> Result<Menu, CatalogApiError> {
        self.db.fetch_menu(id).await?.ok_or(CatalogApiError::MenuNotFound(id))
    }

    pub async fn menus_for_restaurant(&self, restaurant_id: i64) -> Result<Vec<Menu>, CatalogApiError> {
        self.restaurant(restaurant_id).await?;
        self.db.fetch_menus_for_restaurant(restaurant_id).await
    }

    pub async fn create_menu(&self, request: NewMenuRequest) -> Result<Menu, CatalogApiError> {
        let (Some(restaurant_id), Some(name)) = (request.restaurant_id, non_blank(request.name)) else {
            return Err(CatalogApiError::ValidationError("restaurant_id and name are required".into()));
        };
        let description = non_blank(request.description);
        let menu = self.db.create_menu(NewMenu { restaurant_id, name, description }).await?;
        debug!("🍽️ Menu #{} added to restaurant #{restaurant_id}", menu.id);
        Ok(menu)
    }

    pub async fn update_menu(&self, id: i64, request: UpdateMenuRequest) -> Result<Menu, CatalogApiError> {
        let name = non_blank(request.name)
            .ok_or_else(|| CatalogApiError::ValidationError("name is required".into()))?;
        let description = non_blank(request.description);
        self.db.update_menu(id, &name, description.as_deref()).await?.ok_or(CatalogApiError::MenuNotFound(id))
    }

    pub async fn delete_menu(&self, id: i64) -> Result<(), CatalogApiError> {
        if !self.db.delete_menu(id).await? {
            return Err(CatalogApiError::MenuNotFound(id));
        }
        debug!("🍽️ Menu #{id} deleted");
        Ok(())
    }

    //------------------------------------------    Products     ------------------------------------------------------

    pub async fn products(&self) -> Result<Vec<Product>, CatalogApiError> {
        self.db.fetch_products().await
    }

    pub async fn product(&self, id: i64) -> Result<Product, CatalogApiError> {
        self.db.fetch_product(id).await?.ok_or(CatalogApiError::ProductNotFound(id))
    }

    pub async fn create_product(&self, request: NewProductRequest) -> Result<Product, CatalogApiError> {
        let (Some(menu_id), Some(name), Some(price)) = (request.menu_id, non_blank(request.name), request.price) else {
            return Err(CatalogApiError::ValidationError("menu_id, name and price are required".into()));
        };
        validate_price(price)?;
        let description = non_blank(request.description);
        let product = self.db.create_product(NewProduct { menu_id, name, price, description }).await?;
        debug!("🍽️ Product #{} added to menu #{menu_id} at {price}", product.id);
        Ok(product)
    }

    /// Changes a product. A new price applies to future orders only.
    pub async fn update_product(&self, id: i64, request: UpdateProductRequest) -> Result<Product, CatalogApiError> {
        let update = ProductUpdate {
            name: non_blank(request.name),
            price: request.price,
            description: non_blank(request.description),
        };
        if update.is_empty() {
            return Err(CatalogApiError::ValidationError("at least one of name, price or description is required".into()));
        }
        if let Some(price) = update.price {
            validate_price(price)?;
        }
        self.db.update_product(id, update).await?.ok_or(CatalogApiError::ProductNotFound(id))
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), CatalogApiError> {
        if !self.db.delete_product(id).await? {
            return Err(CatalogApiError::ProductNotFound(id));
        }
        debug!("🍽️ Product #{id} deleted");
        Ok(())
    }
}

fn validate_price(price: Cents) -> Result<(), CatalogApiError> {
    if price.is_negative() {
        return Err(CatalogApiError::ValidationError(format!("The price cannot be negative ({price})")));
    }
    Ok(())
}
