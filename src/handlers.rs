pub mod appointments;
pub mod catalog;
pub mod companies;
pub mod customers;
pub mod professionals;
