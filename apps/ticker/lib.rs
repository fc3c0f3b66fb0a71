pub mod collector;
pub mod config;
pub mod discourse_api;
pub mod error;
pub mod headline;
pub mod models;
pub mod publisher;
pub mod selection;
pub mod state;
pub mod ticker;

pub use error::{Result, TickerError};
