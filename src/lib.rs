pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
pub mod validation;
