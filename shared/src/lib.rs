//! Browser-independent core of the Smart Laundry web client: wire types,
//! the auth session store, route guard, OTP login flow and the small pieces
//! of UI state (theme, backend liveness) that the Yew frontend renders.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod guard;
pub mod identifier;
pub mod liveness;
pub mod login_flow;
pub mod models;
pub mod navigation;
pub mod persistence;
pub mod session;
pub mod theme;

pub use error::{AppError, ValidationError};
