use std::sync::Arc;

use crate::{
    analysis::{self, AnalysisService},
    config::{Config, ConfigError},
};

#[derive(Clone)]
pub struct AppState {
    pub analysis: Arc<dyn AnalysisService>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            analysis: analysis::build_service(config.provider())?,
        })
    }
}
