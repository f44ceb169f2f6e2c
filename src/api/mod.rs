pub mod analytics;
pub mod auth;
pub mod catalog;
pub mod entries;
pub mod export;
pub mod health;
pub mod rate_limit;
pub mod report;
pub mod routes;
pub mod users;
