pub mod customers;
pub mod expenses;
pub mod export;
pub mod health;
pub mod herd;
pub mod ledger;
pub mod milk;
pub mod payments;
pub mod reminders;
pub mod reports;
pub mod sales;
pub mod users;
pub mod vaccinations;
