pub mod analysis;
pub mod analyze;
pub mod app_state;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod router;
