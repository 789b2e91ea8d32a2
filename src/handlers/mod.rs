pub mod comment_handlers;
pub mod health_handlers;
pub mod pin_handlers;
pub mod user_handlers;
