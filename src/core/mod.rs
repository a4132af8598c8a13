pub mod airports;
pub mod config;
pub mod constants;
pub mod geo;
pub mod geometry;
pub mod style;
