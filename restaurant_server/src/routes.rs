//! Request handler definitions for the resource API service
//!
//! Define each route and it handler here. The authentication authority's routes live in
//! [`auth_routes`](crate::auth_routes).
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests:
//! ```nocompile
//!     fn my_handler() -> impl Responder {
//!         std::thread::sleep(Duration::from_secs(5)); // <-- Bad practice! Will cause the current worker thread to
//! hang!
//!     }
//! ```
//! For this reason, any long, non-cpu-bound operation (e.g. I/O, database operations, token verification) should be
//! expressed as futures or asynchronous functions.
use actix_web::{get, web, web::ServiceConfig, HttpResponse, Responder};
use log::*;
use restaurant_engine::{
    catalog_objects::{
        NewMenuRequest,
        NewProductRequest,
        NewRestaurantRequest,
        UpdateMenuRequest,
        UpdateProductRequest,
        UpdateRestaurantRequest,
    },
    order_objects::OrderRequest,
    reservation_objects::{NewReservationRequest, UpdateReservationRequest},
    traits::{CatalogManagement, OrderManagement, ReservationManagement},
    CatalogApi,
    OrderFlowApi,
    ReservationApi,
};

use crate::{
    auth::JwtClaims,
    config::ApiOptions,
    data_objects::{JsonResponse, OrderCreatedResponse},
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro.
//
// * `route!(name => Get "/path")` registers a public, non-generic handler.
// * `route!(name => Get "/path" requires token)` registers a non-generic handler behind the token middleware.
// * `route!(name => Get "/path" impl Trait)` registers a public handler that is generic over a storage backend.
// * `... impl Trait where requires token` adds the token middleware in required mode.
// * `... impl Trait where accepts token` adds it in optional mode; the handler sees `Option<JwtClaims>`.
#[macro_export]
macro_rules! route {
    (@plain $name:ident, $method:ident, $path:literal, $($auth:expr)?) => {
        paste::paste! { pub struct [<$name:camel Route>];}
        paste::paste! {
            impl [<$name:camel Route>] {
                #[allow(clippy::new_without_default)]
                pub fn new() -> Self { Self }
            }
        }
        paste::paste! {
            impl actix_web::dev::HttpServiceFactory for [<$name:camel Route>] {
                fn register(self, config: &mut actix_web::dev::AppService) {
                    let res = actix_web::Resource::new($path)
                        .name(stringify!($name))
                        .guard(actix_web::guard::$method())
                        .to($name)
                        $(.wrap($auth))?;
                    actix_web::dev::HttpServiceFactory::register(res, config);
                }
            }
        }
    };

    (@generic $name:ident, $method:ident, $path:literal, [$($bounds:ty),+], $($auth:expr)?) => {
        paste::paste! { pub struct [<$name:camel Route>]<A>(core::marker::PhantomData<fn() -> A>);}
        paste::paste! { impl<A> [<$name:camel Route>]<A> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData::<fn() -> A>)
            }
        }}
        paste::paste! { impl<A> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<A>
        where
            A: $($bounds +)+ 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<A>)
                    $(.wrap($auth))?;
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };

    ($name:ident => $method:ident $path:literal) => {
        $crate::route!(@plain $name, $method, $path, );
    };

    ($name:ident => $method:ident $path:literal requires token) => {
        $crate::route!(@plain $name, $method, $path, $crate::middleware::TokenAuthFactory::required());
    };

    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        $crate::route!(@generic $name, $method, $path, [$($bounds),+], );
    };

    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+ where requires token) => {
        $crate::route!(
            @generic $name, $method, $path, [$($bounds),+], $crate::middleware::TokenAuthFactory::required()
        );
    };

    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+ where accepts token) => {
        $crate::route!(
            @generic $name, $method, $path, [$($bounds),+], $crate::middleware::TokenAuthFactory::optional()
        );
    };
}

/// Registers every resource API route for backend `B`.
pub fn configure_api_routes<B>(cfg: &mut ServiceConfig)
where B: OrderManagement + CatalogManagement + ReservationManagement + 'static {
    cfg.service(health)
        .service(CreateOrderRoute::<B>::new())
        .service(MyOrdersRoute::<B>::new())
        .service(OrderByIdRoute::<B>::new())
        .service(RestaurantsRoute::<B>::new())
        .service(RestaurantByIdRoute::<B>::new())
        .service(CreateRestaurantRoute::<B>::new())
        .service(UpdateRestaurantRoute::<B>::new())
        .service(DeleteRestaurantRoute::<B>::new())
        .service(MenusForRestaurantRoute::<B>::new())
        .service(MenuByIdRoute::<B>::new())
        .service(CreateMenuRoute::<B>::new())
        .service(UpdateMenuRoute::<B>::new())
        .service(DeleteMenuRoute::<B>::new())
        .service(ProductsRoute::<B>::new())
        .service(ProductByIdRoute::<B>::new())
        .service(CreateProductRoute::<B>::new())
        .service(UpdateProductRoute::<B>::new())
        .service(DeleteProductRoute::<B>::new())
        .service(ReservationsRoute::<B>::new())
        .service(ReservationByIdRoute::<B>::new())
        .service(CreateReservationRoute::<B>::new())
        .service(UpdateReservationRoute::<B>::new())
        .service(DeleteReservationRoute::<B>::new());
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(create_order => Post "/orders" impl OrderManagement where accepts token);
/// Route handler for placing an order
///
/// The customer is the caller identified by the bearer token. If the server has been started with
/// `RMS_ALLOW_EXPLICIT_CUSTOMER_ID`, an anonymous caller may name the customer in the `customer_id` field instead.
///
/// Responds with 201 and the new order id. Nothing is written unless every line of the cart can be priced.
pub async fn create_order<B: OrderManagement>(
    claims: Option<JwtClaims>,
    options: web::Data<ApiOptions>,
    api: web::Data<OrderFlowApi<B>>,
    body: web::Json<OrderRequest>,
) -> Result<HttpResponse, ServerError> {
    let request = body.into_inner();
    let customer = match &claims {
        Some(claims) => Some(claims.id),
        None if options.allow_explicit_customer_id => request.customer_id,
        None => None,
    };
    debug!("💻️ POST order for customer {customer:?}");
    let order_id = api.place_order(customer, request).await?;
    let response = OrderCreatedResponse { message: "Order created".into(), order_id };
    Ok(HttpResponse::Created().json(response))
}

route!(my_orders => Get "/orders" impl OrderManagement where requires token);
/// The order headers placed by the authenticated caller, oldest first.
pub async fn my_orders<B: OrderManagement>(
    claims: JwtClaims,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET orders for user #{}", claims.id);
    let orders = api.orders_for_customer(claims.id).await?;
    Ok(HttpResponse::Ok().json(orders))
}

route!(order_by_id => Get "/orders/{id}" impl OrderManagement where requires token);
/// An order header and its lines, as `{"order": {...}, "products": [...]}`.
pub async fn order_by_id<B: OrderManagement>(
    path: web::Path<i64>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ GET order #{id}");
    let order = api.order_by_id(id).await?.ok_or_else(|| ServerError::NoRecordFound(format!("Order #{id}")))?;
    Ok(HttpResponse::Ok().json(order))
}

//----------------------------------------------   Restaurants  ----------------------------------------------------
route!(restaurants => Get "/restaurants" impl CatalogManagement);
pub async fn restaurants<B: CatalogManagement>(api: web::Data<CatalogApi<B>>) -> Result<HttpResponse, ServerError> {
    let restaurants = api.restaurants().await?;
    Ok(HttpResponse::Ok().json(restaurants))
}

route!(restaurant_by_id => Get "/restaurants/{id}" impl CatalogManagement);
pub async fn restaurant_by_id<B: CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let restaurant = api.restaurant(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(restaurant))
}

route!(create_restaurant => Post "/restaurants" impl CatalogManagement where accepts token);
/// Creates a restaurant administered by the caller. Anonymous callers must supply `admin_id`.
pub async fn create_restaurant<B: CatalogManagement>(
    claims: Option<JwtClaims>,
    api: web::Data<CatalogApi<B>>,
    body: web::Json<NewRestaurantRequest>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST restaurant");
    let restaurant = api.create_restaurant(claims.map(|c| c.id), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(restaurant))
}

route!(update_restaurant => Put "/restaurants/{id}" impl CatalogManagement where requires token);
pub async fn update_restaurant<B: CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<CatalogApi<B>>,
    body: web::Json<UpdateRestaurantRequest>,
) -> Result<HttpResponse, ServerError> {
    let restaurant = api.update_restaurant(path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(restaurant))
}

route!(delete_restaurant => Delete "/restaurants/{id}" impl CatalogManagement where requires token);
pub async fn delete_restaurant<B: CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    api.delete_restaurant(id).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::new(format!("Restaurant #{id} deleted"))))
}

//----------------------------------------------   Menus  ----------------------------------------------------
route!(menus_for_restaurant => Get "/restaurants/{id}/menus" impl CatalogManagement);
pub async fn menus_for_restaurant<B: CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let menus = api.menus_for_restaurant(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(menus))
}

route!(menu_by_id => Get "/menus/{id}" impl CatalogManagement);
pub async fn menu_by_id<B: CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let menu = api.menu(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(menu))
}

route!(create_menu => Post "/menus" impl CatalogManagement where requires token);
pub async fn create_menu<B: CatalogManagement>(
    api: web::Data<CatalogApi<B>>,
    body: web::Json<NewMenuRequest>,
) -> Result<HttpResponse, ServerError> {
    let menu = api.create_menu(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(menu))
}

route!(update_menu => Put "/menus/{id}" impl CatalogManagement where requires token);
pub async fn update_menu<B: CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<CatalogApi<B>>,
    body: web::Json<UpdateMenuRequest>,
) -> Result<HttpResponse, ServerError> {
    let menu = api.update_menu(path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(menu))
}

route!(delete_menu => Delete "/menus/{id}" impl CatalogManagement where requires token);
pub async fn delete_menu<B: CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    api.delete_menu(id).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::new(format!("Menu #{id} deleted"))))
}

//----------------------------------------------   Products  ----------------------------------------------------
route!(products => Get "/products" impl CatalogManagement);
pub async fn products<B: CatalogManagement>(api: web::Data<CatalogApi<B>>) -> Result<HttpResponse, ServerError> {
    let products = api.products().await?;
    Ok(HttpResponse::Ok().json(products))
}

route!(product_by_id => Get "/products/{id}" impl CatalogManagement);
pub async fn product_by_id<B: CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let product = api.product(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product))
}

route!(create_product => Post "/products" impl CatalogManagement where requires token);
/// Adds a product to a menu. Prices are given in cents.
pub async fn create_product<B: CatalogManagement>(
    api: web::Data<CatalogApi<B>>,
    body: web::Json<NewProductRequest>,
) -> Result<HttpResponse, ServerError> {
    let product = api.create_product(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(product))
}

route!(update_product => Put "/products/{id}" impl CatalogManagement where requires token);
/// Changes a product's name, price or description. Existing orders keep the price they were placed at.
pub async fn update_product<B: CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<CatalogApi<B>>,
    body: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, ServerError> {
    let product = api.update_product(path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product))
}

route!(delete_product => Delete "/products/{id}" impl CatalogManagement where requires token);
pub async fn delete_product<B: CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    api.delete_product(id).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::new(format!("Product #{id} deleted"))))
}

//----------------------------------------------   Reservations  ----------------------------------------------------
route!(reservations => Get "/reservations" impl ReservationManagement);
pub async fn reservations<B: ReservationManagement>(
    api: web::Data<ReservationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let reservations = api.reservations().await?;
    Ok(HttpResponse::Ok().json(reservations))
}

route!(reservation_by_id => Get "/reservations/{id}" impl ReservationManagement);
pub async fn reservation_by_id<B: ReservationManagement>(
    path: web::Path<i64>,
    api: web::Data<ReservationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let reservation = api.reservation(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(reservation))
}

route!(create_reservation => Post "/reservations" impl ReservationManagement where requires token);
/// Books a table for the caller. Administrators may book on behalf of another user by setting `user_id`.
pub async fn create_reservation<B: ReservationManagement>(
    claims: JwtClaims,
    api: web::Data<ReservationApi<B>>,
    body: web::Json<NewReservationRequest>,
) -> Result<HttpResponse, ServerError> {
    let request = body.into_inner();
    let customer = match request.user_id {
        Some(_) if claims.actor().is_admin() => None,
        _ => Some(claims.id),
    };
    debug!("💻️ POST reservation by user #{}", claims.id);
    let reservation = api.create_reservation(customer, request).await?;
    Ok(HttpResponse::Created().json(reservation))
}

route!(update_reservation => Put "/reservations/{id}" impl ReservationManagement where requires token);
pub async fn update_reservation<B: ReservationManagement>(
    path: web::Path<i64>,
    api: web::Data<ReservationApi<B>>,
    body: web::Json<UpdateReservationRequest>,
) -> Result<HttpResponse, ServerError> {
    let reservation = api.update_reservation(path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(reservation))
}

route!(delete_reservation => Delete "/reservations/{id}" impl ReservationManagement where requires token);
pub async fn delete_reservation<B: ReservationManagement>(
    path: web::Path<i64>,
    api: web::Data<ReservationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    api.delete_reservation(id).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::new(format!("Reservation #{id} deleted"))))
}
