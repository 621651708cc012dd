pub mod availability;
pub mod identity;
pub mod meet;
