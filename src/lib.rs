pub mod config;
pub mod datasets;
pub mod render;
pub mod viewer;
