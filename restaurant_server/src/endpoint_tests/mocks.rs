use mockall::mock;
use restaurant_engine::{
    db_types::{NewOrder, NewUser, Order, OrderWithLines, UserAccount, UserUpdate},
    traits::{OrderManagement, UserManagement},
    AuthApiError,
    OrderFlowError,
};

mock! {
    pub UserManager {}
    impl UserManagement for UserManager {
        async fn create_user(&self, user: NewUser) -> Result<UserAccount, AuthApiError>;
        async fn fetch_user_by_email(&self, email: &str) -> Result<Option<UserAccount>, AuthApiError>;
        async fn fetch_user_by_id(&self, id: i64) -> Result<Option<UserAccount>, AuthApiError>;
        async fn update_user(&self, id: i64, update: UserUpdate) -> Result<Option<UserAccount>, AuthApiError>;
        async fn delete_user(&self, id: i64) -> Result<bool, AuthApiError>;
    }
}

mock! {
    pub OrderManager {}
    impl OrderManagement for OrderManager {
        async fn insert_order(&self, order: NewOrder) -> Result<i64, OrderFlowError>;
        async fn fetch_order_with_lines(&self, id: i64) -> Result<Option<OrderWithLines>, OrderFlowError>;
        async fn fetch_orders_for_customer(&self, customer_id: i64) -> Result<Vec<Order>, OrderFlowError>;
    }
}
