use crate::{
    db_types::{Menu, NewMenu, NewProduct, NewRestaurant, Product, ProductUpdate, Restaurant},
    rms_api::CatalogApiError,
};

/// Storage for restaurants, menus and products.
///
/// Creating a menu for an unknown restaurant must fail with [`CatalogApiError::RestaurantNotFound`], and creating a
/// product for an unknown menu with [`CatalogApiError::MenuNotFound`]. Deleting a row that is still referenced by an
/// order must fail with [`CatalogApiError::InUse`].
#[allow(async_fn_in_trait)]
pub trait CatalogManagement {
    async fn create_restaurant(&self, restaurant: NewRestaurant) -> Result<Restaurant, CatalogApiError>;

    async fn fetch_restaurants(&self) -> Result<Vec<Restaurant>, CatalogApiError>;

    async fn fetch_restaurant(&self, id: i64) -> Result<Option<Restaurant>, CatalogApiError>;

    async fn update_restaurant(&self, id: i64, name: &str, address: &str)
        -> Result<Option<Restaurant>, CatalogApiError>;

    async fn delete_restaurant(&self, id: i64) -> Result<bool, CatalogApiError>;

    async fn create_menu(&self, menu: NewMenu) -> Result<Menu, CatalogApiError>;

    async fn fetch_menu(&self, id: i64) -> Result<Option<Menu>, CatalogApiError>;

    async fn fetch_menus_for_restaurant(&self, restaurant_id: i64) -> Result<Vec<Menu>, CatalogApiError>;

    async fn update_menu(
        &self,
        id: i64,
        name: &str,
        description: Option<&str>,
    ) -> Result<Option<Menu>, CatalogApiError>;

    async fn delete_menu(&self, id: i64) -> Result<bool, CatalogApiError>;

    async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogApiError>;

    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogApiError>;

    async fn fetch_product(&self, id: i64) -> Result<Option<Product>, CatalogApiError>;

    async fn update_product(&self, id: i64, update: ProductUpdate) -> Result<Option<Product>, CatalogApiError>;

    async fn delete_product(&self, id: i64) -> Result<bool, CatalogApiError>;
}
