//! Fixed request pacing
//!
//! The crawl is strictly sequential; these pauses are the only request-rate
//! control toward the directory server.

use crate::config::PacingConfig;
use std::time::Duration;

/// Pauses applied between crawl steps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pacing {
    pub branch: Duration,
    pub subcategory: Duration,
    pub child: Duration,
}

impl Pacing {
    pub fn from_config(config: &PacingConfig) -> Self {
        Self {
            branch: Duration::from_millis(config.branch_delay),
            subcategory: Duration::from_millis(config.subcategory_delay),
            child: Duration::from_millis(config.child_delay),
        }
    }

    /// No pauses at all
    pub fn none() -> Self {
        Self::default()
    }

    pub async fn after_branch(&self) {
        pause(self.branch).await;
    }

    pub async fn after_subcategory(&self) {
        pause(self.subcategory).await;
    }

    pub async fn after_child(&self) {
        pause(self.child).await;
    }
}

async fn pause(duration: Duration) {
    if duration.is_zero() {
        return;
    }
    tracing::trace!("Pausing for {:?}", duration);
    tokio::time::sleep(duration).await;
}
