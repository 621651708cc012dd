pub mod availability;
pub mod meets;
