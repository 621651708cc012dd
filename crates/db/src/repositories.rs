pub mod meet;
