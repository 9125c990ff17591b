pub mod catalog;
pub mod config;
pub mod error;
pub mod geometry;
pub mod lineup;
pub mod pitch;
pub mod render;
pub mod search;
pub mod session;
pub mod snapshot;

pub use lineup_protocol;
