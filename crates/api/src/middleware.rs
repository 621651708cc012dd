/// Bearer-token authentication against the identity service
pub mod auth;
/// Domain error to HTTP response mapping
pub mod error_handling;
