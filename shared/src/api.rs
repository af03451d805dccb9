use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::UserRef;

// ============================================================================
// Endpoints
// ============================================================================

pub const HELLO_PATH: &str = "/hello";
pub const SEND_OTP_PATH: &str = "/auth/send-otp";
pub const LOGIN_PATH: &str = "/auth/login";
pub const GOOGLE_AUTH_PATH: &str = "/auth/google";
pub const MY_ORDERS_PATH: &str = "/orders/my";
pub const ADMIN_ORDERS_PATH: &str = "/admin/orders";

// ============================================================================
// Auth API Types
// ============================================================================

/// Body of `POST /auth/send-otp`. The field is named `email` even when it
/// carries a phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendOtpRequest {
    pub email: String,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserRef,
    pub token: String,
}

// ============================================================================
// Liveness
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelloResponse {
    pub message: String,
}

// ============================================================================
// Order API Types
// ============================================================================

/// Entry of `GET /orders/my`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyOrder {
    #[serde(rename = "_id")]
    pub id: String,
    pub service_name: String,
    pub status: String,
    pub total: f64,
    pub created_at: String,
    pub pickup_time: Option<String>,
    pub delivery_time: Option<String>,
}

/// Entry of `GET /admin/orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminOrder {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub items: Vec<Value>,
    pub total: f64,
    pub status: String,
    pub created_at: String,
    pub pickup_time: Option<String>,
    pub delivery_time: Option<String>,
}

// ============================================================================
// Error Types
// ============================================================================

/// Error body the backend attaches to non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    /// Extracts `message` from a raw response body, if it is one.
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str::<Self>(body)
            .ok()
            .filter(|error| !error.message.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_from_backend_body() {
        let body = r#"{
            "token": "eyJ.abc.def",
            "user": {"id": "admin@laundry.com", "email": "admin@laundry.com", "name": "admin", "phone": "", "role": "admin", "created_at": "2024-05-01T10:00:00"},
            "message": "Login successful"
        }"#;
        let response: LoginResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.token, "eyJ.abc.def");
        assert!(response.user.role.is_admin());
    }

    #[test]
    fn test_send_otp_request_uses_email_field_for_phone() {
        let request = SendOtpRequest {
            email: "9876543210".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"email":"9876543210"}"#
        );
    }

    #[test]
    fn test_my_order_field_names() {
        let body = r#"[{"_id":"ORD_1700000000","serviceName":"Laundry Service","status":"Pending","total":85,"createdAt":"2024-05-01T10:00:00","pickupTime":"2024-05-01 12:00","deliveryTime":"2024-05-02 10:00"}]"#;
        let orders: Vec<MyOrder> = serde_json::from_str(body).unwrap();
        assert_eq!(orders[0].id, "ORD_1700000000");
        assert_eq!(orders[0].total, 85.0);
    }

    #[test]
    fn test_error_response_parse() {
        assert_eq!(
            ErrorResponse::parse(r#"{"message":"Invalid OTP"}"#),
            Some(ErrorResponse {
                message: "Invalid OTP".to_string()
            })
        );
        assert_eq!(ErrorResponse::parse("<html>oops</html>"), None);
        assert_eq!(ErrorResponse::parse(r#"{"message":"  "}"#), None);
    }
}
