pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extraction;
pub mod logging;
pub mod posts;
pub mod state;
pub mod users;
