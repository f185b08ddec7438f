pub mod api;
pub mod charts;
pub mod config;
pub mod gateway;
pub mod page;
pub mod projector;
pub mod render;
pub mod scheduler;
pub mod state;
