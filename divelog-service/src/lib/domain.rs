pub mod auth;
pub mod divelog;
pub mod user;
