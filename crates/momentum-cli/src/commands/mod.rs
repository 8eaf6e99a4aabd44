pub mod config;
pub mod momentum;
