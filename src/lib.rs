//! Movie catalog explorer: browse and search a remote catalog, filter the results,
//! and keep a durable list of favorites.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
