mod token_auth;

pub use token_auth::{AuthMode, TokenAuthFactory, TokenAuthService};
