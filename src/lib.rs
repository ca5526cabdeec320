pub mod config;
pub mod normalize;
pub mod schema;
pub mod types;
