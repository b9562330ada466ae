pub mod format;

pub use format::{user_to_api_value, users_to_api_values, UserResponse};
