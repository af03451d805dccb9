pub mod backend_status;
pub mod navbar;
pub mod protected_route;
pub mod toast;
