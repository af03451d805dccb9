pub mod about;
pub mod admin;
pub mod cart;
pub mod checkout;
pub mod contact;
pub mod dashboard;
pub mod home;
pub mod login;
pub mod not_found;
pub mod service_detail;
pub mod services;
