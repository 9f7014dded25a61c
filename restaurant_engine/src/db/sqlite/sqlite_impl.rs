use std::fmt::Debug;

use log::*;
use sqlx::{migrate, SqliteConnection, SqlitePool};

use super::{db_url, menus, new_pool, orders, products, reservations, restaurants, users, SqliteDatabaseError};
use crate::{
    db::traits::{CatalogManagement, OrderManagement, ReservationManagement, UserManagement},
    db_types::{
        Menu,
        NewMenu,
        NewOrder,
        NewProduct,
        NewReservation,
        NewRestaurant,
        NewUser,
        Order,
        OrderWithLines,
        Product,
        ProductUpdate,
        Reservation,
        ReservationUpdate,
        Restaurant,
        UserAccount,
        UserUpdate,
    },
    rms_api::{AuthApiError, CatalogApiError, OrderFlowError, ReservationApiError},
};

/// The SQLite storage backend. Cloning is cheap: every clone shares the same connection pool.
#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SqliteDatabase ({})", self.url)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object using the URL in `RMS_DATABASE_URL`
    pub async fn new(max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        let url = db_url();
        SqliteDatabase::new_with_url(&url, max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        let pool = new_pool(url, max_connections).await?;
        trace!("🗃️ Created new connection pool for {url}");
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns a reference to the database connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> Result<(), SqliteDatabaseError> {
        migrate!("./src/db/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Migrations complete for {}", self.url);
        Ok(())
    }

    /// Closes every connection in the pool. Further queries on any clone of this handle will fail.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("🗃️ Connection pool for {} closed", self.url);
    }

    /// The body of the order placement transaction. Every statement runs on the same connection.
    async fn write_order(order: &NewOrder, conn: &mut SqliteConnection) -> Result<i64, OrderFlowError> {
        let order_id = orders::insert_order_header(order, &mut *conn).await?;
        for line in &order.lines {
            let price = products::fetch_price(line.product_id, &mut *conn)
                .await?
                .ok_or(OrderFlowError::ProductNotFound(line.product_id))?;
            let subtotal = price.checked_mul(line.quantity).ok_or_else(|| {
                OrderFlowError::InvalidInput(format!("The subtotal for product #{} overflows", line.product_id))
            })?;
            orders::insert_order_line(order_id, line.product_id, line.quantity, subtotal, &mut *conn).await?;
        }
        Ok(order_id)
    }
}

impl UserManagement for SqliteDatabase {
    async fn create_user(&self, user: NewUser) -> Result<UserAccount, AuthApiError> {
        let mut tx = self.pool.begin().await?;
        let account = users::insert_user(user, &mut tx).await?;
        tx.commit().await?;
        Ok(account)
    }

    async fn fetch_user_by_email(&self, email: &str) -> Result<Option<UserAccount>, AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        let account = users::fetch_user_by_email(email, &mut conn).await?;
        Ok(account)
    }

    async fn fetch_user_by_id(&self, id: i64) -> Result<Option<UserAccount>, AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        let account = users::fetch_user_by_id(id, &mut conn).await?;
        Ok(account)
    }

    async fn update_user(&self, id: i64, update: UserUpdate) -> Result<Option<UserAccount>, AuthApiError> {
        let mut tx = self.pool.begin().await?;
        let account = users::update_user(id, update, &mut tx).await?;
        tx.commit().await?;
        Ok(account)
    }

    async fn delete_user(&self, id: i64) -> Result<bool, AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        let deleted = users::delete_user(id, &mut conn).await?;
        Ok(deleted)
    }
}

/// Maps a failed delete to [`CatalogApiError::InUse`] when the row is still referenced elsewhere.
fn in_use(what: &str, id: i64) -> impl FnOnce(SqliteDatabaseError) -> CatalogApiError + '_ {
    move |e| match e {
        SqliteDatabaseError::ForeignKeyViolation(_) => {
            CatalogApiError::InUse(format!("{what} #{id} cannot be deleted because existing orders refer to it"))
        },
        e => e.into(),
    }
}

impl CatalogManagement for SqliteDatabase {
    async fn create_restaurant(&self, restaurant: NewRestaurant) -> Result<Restaurant, CatalogApiError> {
        let mut tx = self.pool.begin().await?;
        let restaurant = restaurants::insert_restaurant(restaurant, &mut tx).await?;
        tx.commit().await?;
        Ok(restaurant)
    }

    async fn fetch_restaurants(&self) -> Result<Vec<Restaurant>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        let result = restaurants::fetch_restaurants(&mut conn).await?;
        Ok(result)
    }

    async fn fetch_restaurant(&self, id: i64) -> Result<Option<Restaurant>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        let restaurant = restaurants::fetch_restaurant(id, &mut conn).await?;
        Ok(restaurant)
    }

    async fn update_restaurant(
        &self,
        id: i64,
        name: &str,
        address: &str,
    ) -> Result<Option<Restaurant>, CatalogApiError> {
        let mut tx = self.pool.begin().await?;
        let restaurant = restaurants::update_restaurant(id, name, address, &mut tx).await?;
        tx.commit().await?;
        Ok(restaurant)
    }

    async fn delete_restaurant(&self, id: i64) -> Result<bool, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        restaurants::delete_restaurant(id, &mut conn).await.map_err(in_use("Restaurant", id))
    }

    async fn create_menu(&self, menu: NewMenu) -> Result<Menu, CatalogApiError> {
        let restaurant_id = menu.restaurant_id;
        let mut tx = self.pool.begin().await?;
        let menu = menus::insert_menu(menu, &mut tx).await.map_err(|e| match e {
            SqliteDatabaseError::ForeignKeyViolation(_) => CatalogApiError::RestaurantNotFound(restaurant_id),
            e => e.into(),
        })?;
        tx.commit().await?;
        Ok(menu)
    }

    async fn fetch_menu(&self, id: i64) -> Result<Option<Menu>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        let menu = menus::fetch_menu(id, &mut conn).await?;
        Ok(menu)
    }

    async fn fetch_menus_for_restaurant(&self, restaurant_id: i64) -> Result<Vec<Menu>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        let result = menus::fetch_menus_for_restaurant(restaurant_id, &mut conn).await?;
        Ok(result)
    }

    async fn update_menu(
        &self,
        id: i64,
        name: &str,
        description: Option<&str>,
    ) -> Result<Option<Menu>, CatalogApiError> {
        let mut tx = self.pool.begin().await?;
        let menu = menus::update_menu(id, name, description, &mut tx).await?;
        tx.commit().await?;
        Ok(menu)
    }

    async fn delete_menu(&self, id: i64) -> Result<bool, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        menus::delete_menu(id, &mut conn).await.map_err(in_use("Menu", id))
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogApiError> {
        let menu_id = product.menu_id;
        let mut tx = self.pool.begin().await?;
        let product = products::insert_product(product, &mut tx).await.map_err(|e| match e {
            SqliteDatabaseError::ForeignKeyViolation(_) => CatalogApiError::MenuNotFound(menu_id),
            e => e.into(),
        })?;
        tx.commit().await?;
        Ok(product)
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        let result = products::fetch_products(&mut conn).await?;
        Ok(result)
    }

    async fn fetch_product(&self, id: i64) -> Result<Option<Product>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        let product = products::fetch_product(id, &mut conn).await?;
        Ok(product)
    }

    async fn update_product(&self, id: i64, update: ProductUpdate) -> Result<Option<Product>, CatalogApiError> {
        let mut tx = self.pool.begin().await?;
        let product = products::update_product(id, update, &mut tx).await?;
        tx.commit().await?;
        Ok(product)
    }

    async fn delete_product(&self, id: i64) -> Result<bool, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        products::delete_product(id, &mut conn).await.map_err(in_use("Product", id))
    }
}

impl OrderManagement for SqliteDatabase {
    async fn insert_order(&self, order: NewOrder) -> Result<i64, OrderFlowError> {
        let mut tx = self.pool.begin().await?;
        match Self::write_order(&order, &mut tx).await {
            Ok(order_id) => {
                tx.commit().await?;
                debug!("🗃️ Order #{order_id} with {} lines committed", order.lines.len());
                Ok(order_id)
            },
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    error!("🗃️ Could not roll back failed order for customer #{}. {rollback_err}", order.customer_id);
                }
                debug!("🗃️ Order for customer #{} rolled back. {e}", order.customer_id);
                Err(e)
            },
        }
    }

    async fn fetch_order_with_lines(&self, id: i64) -> Result<Option<OrderWithLines>, OrderFlowError> {
        let mut conn = self.pool.acquire().await?;
        let Some(order) = orders::fetch_order(id, &mut conn).await? else {
            return Ok(None);
        };
        let products = orders::fetch_order_lines(id, &mut conn).await?;
        Ok(Some(OrderWithLines { order, products }))
    }

    async fn fetch_orders_for_customer(&self, customer_id: i64) -> Result<Vec<Order>, OrderFlowError> {
        let mut conn = self.pool.acquire().await?;
        let result = orders::fetch_orders_for_customer(customer_id, &mut conn).await?;
        Ok(result)
    }
}

impl ReservationManagement for SqliteDatabase {
    async fn create_reservation(&self, reservation: NewReservation) -> Result<Reservation, ReservationApiError> {
        let restaurant_id = reservation.restaurant_id;
        let mut tx = self.pool.begin().await?;
        let reservation = reservations::insert_reservation(reservation, &mut tx).await.map_err(|e| match e {
            SqliteDatabaseError::ForeignKeyViolation(_) => ReservationApiError::RestaurantNotFound(restaurant_id),
            e => e.into(),
        })?;
        tx.commit().await?;
        Ok(reservation)
    }

    async fn fetch_reservations(&self) -> Result<Vec<Reservation>, ReservationApiError> {
        let mut conn = self.pool.acquire().await?;
        let result = reservations::fetch_reservations(&mut conn).await?;
        Ok(result)
    }

    async fn fetch_reservation(&self, id: i64) -> Result<Option<Reservation>, ReservationApiError> {
        let mut conn = self.pool.acquire().await?;
        let reservation = reservations::fetch_reservation(id, &mut conn).await?;
        Ok(reservation)
    }

    async fn update_reservation(
        &self,
        id: i64,
        update: ReservationUpdate,
    ) -> Result<Option<Reservation>, ReservationApiError> {
        let mut tx = self.pool.begin().await?;
        let reservation = reservations::update_reservation(id, update, &mut tx).await?;
        tx.commit().await?;
        Ok(reservation)
    }

    async fn delete_reservation(&self, id: i64) -> Result<bool, ReservationApiError> {
        let mut conn = self.pool.acquire().await?;
        let deleted = reservations::delete_reservation(id, &mut conn).await?;
        Ok(deleted)
    }
}
