pub mod label;
pub mod store;
pub mod walk;
