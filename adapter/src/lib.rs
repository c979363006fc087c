pub mod database;
pub mod google;
pub mod redis;
pub mod repository;
