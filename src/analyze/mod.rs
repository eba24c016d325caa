pub mod dtos;
pub mod handlers;

pub use dtos::{AnalyzeRequest, AnalyzeResponse};
pub use handlers::analyze_url;
