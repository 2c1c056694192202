//! Health probe types

use serde::{Deserialize, Serialize};

pub const HEALTHY_MESSAGE: &str = "It's healthy";
pub const UNHEALTHY_MESSAGE: &str = "It's unhealthy";

/// Body returned by the health endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub message: String,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            message: HEALTHY_MESSAGE.to_string(),
        }
    }

    pub fn unhealthy() -> Self {
        Self {
            message: UNHEALTHY_MESSAGE.to_string(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.message == HEALTHY_MESSAGE
    }
}
