pub mod models;
pub mod repo;
pub mod seed;

pub use seed::{run as seed, SeedReport};
