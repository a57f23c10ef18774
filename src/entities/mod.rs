pub mod cow;
pub mod customer;
pub mod expense;
pub mod health_record;
pub mod milk_production;
pub mod payment;
pub mod sale;
pub mod session;
pub mod user;
pub mod vaccination;
