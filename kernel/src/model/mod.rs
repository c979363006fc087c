pub mod account;
pub mod album;
pub mod auth;
pub mod business_hour;
pub mod court;
pub mod id;
pub mod range;
pub mod reservation;
pub mod role;
pub mod stadium;
pub mod venue;
