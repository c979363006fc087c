pub mod account;
pub mod album;
pub mod business_hour;
pub mod court;
pub mod reservation;
pub mod stadium;
pub mod venue;
