#![allow(dead_code)]
use restaurant_engine::{
    catalog_objects::{NewMenuRequest, NewProductRequest, NewRestaurantRequest},
    db_types::{Cents, Product, Restaurant},
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    CatalogApi,
    SqliteDatabase,
};

/// A migrated database in a throw-away file.
pub async fn new_test_db() -> SqliteDatabase {
    prepare_test_env(&random_db_path()).await
}

pub struct Catalog {
    pub restaurant: Restaurant,
    pub tacos: Product,
    pub horchata: Product,
}

/// One restaurant with a single menu holding tacos (12.99) and horchata (4.50).
pub async fn seed_catalog(db: &SqliteDatabase) -> Catalog {
    let api = CatalogApi::new(db.clone());
    let restaurant = api
        .create_restaurant(Some(1), NewRestaurantRequest {
            name: Some("La Cantina".into()),
            address: Some("Calle 5 #12".into()),
            admin_id: None,
        })
        .await
        .expect("Error creating restaurant");
    let menu = api
        .create_menu(NewMenuRequest {
            restaurant_id: Some(restaurant.id),
            name: Some("Comida".into()),
            description: None,
        })
        .await
        .expect("Error creating menu");
    let tacos = new_product(&api, menu.id, "Tacos", 1299).await;
    let horchata = new_product(&api, menu.id, "Horchata", 450).await;
    Catalog { restaurant, tacos, horchata }
}

pub async fn new_product(api: &CatalogApi<SqliteDatabase>, menu_id: i64, name: &str, price: i64) -> Product {
    api.create_product(NewProductRequest {
        menu_id: Some(menu_id),
        name: Some(name.into()),
        price: Some(Cents::from(price)),
        description: None,
    })
    .await
    .expect("Error creating product")
}

pub async fn count_rows(db: &SqliteDatabase, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(db.pool())
        .await
        .expect("Error counting rows")
}
