mod password;

pub use password::{
    hash_password,
    hash_password_off_thread,
    verify_password,
    verify_password_off_thread,
    verify_password_or_dummy,
};
