use async_trait::async_trait;
use std::fmt::Debug;

use crate::{config::LocationConfig, error::LocationError, model::Coordinates};

/// Source of the device's current position.
#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    /// Ask for permission (if needed) and read the current position.
    async fn current_coordinates(&self) -> Result<Coordinates, LocationError>;
}

/// Position taken from the `[location]` config section.
#[derive(Debug, Clone)]
pub struct ConfiguredLocation {
    config: LocationConfig,
}

impl ConfiguredLocation {
    pub fn new(config: LocationConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl LocationProvider for ConfiguredLocation {
    async fn current_coordinates(&self) -> Result<Coordinates, LocationError> {
        if !self.config.enabled {
            return Err(LocationError::PermissionDenied);
        }

        self.config.coordinates().ok_or(LocationError::Unavailable)
    }
}
