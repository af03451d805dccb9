pub mod auth;
pub mod theme;
