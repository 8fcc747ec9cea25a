pub mod dashboard;
pub mod orders;
pub mod products;
pub mod recommendations;
pub mod users;
