/// API route modules
pub mod health;
pub mod info;
pub mod users;
