pub mod user_delete;
pub mod user_get;
pub mod user_put;
pub mod users_get;
pub mod users_post;

// Re-export handler functions for use in routing
pub use user_delete::user_delete;
pub use user_get::user_get;
pub use user_put::user_put;
pub use users_get::users_get;
pub use users_post::users_post;
