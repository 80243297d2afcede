use std::sync::Arc;

use crate::config::AppConfig;

/// Estado compartido por los handlers. Cada subida crea su propia ranura de
/// extracción, así que aquí no hay nada mutable.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
