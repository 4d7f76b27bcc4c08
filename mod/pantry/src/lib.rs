pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;
use carelog_core::Module;

use service::PantryService;

/// Pantry Module — care-item and consumption record keeping.
pub struct PantryModule {
    service: Arc<PantryService>,
}

impl PantryModule {
    pub fn new(service: PantryService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

impl Module for PantryModule {
    fn name(&self) -> &str {
        "pantry"
    }

    fn routes(&self) -> Router {
        api::router(self.service.clone())
    }
}
