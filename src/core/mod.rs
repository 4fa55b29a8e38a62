//! Configuration, errors and project roots

pub mod config;
pub mod error;
pub mod project;
