//! Engine configuration

use counter_core::DEFAULT_PROCESSING_DURATION;
use counter_removal::RemovalPolicyKind;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Dispatch engine settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Ticks a bot needs to finish one order
    pub processing_duration: u32,

    /// Which bot goes when a removal is requested
    pub removal_policy: RemovalPolicyKind,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            processing_duration: DEFAULT_PROCESSING_DURATION,
            removal_policy: RemovalPolicyKind::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_processing_duration(mut self, ticks: u32) -> Self {
        self.processing_duration = ticks;
        self
    }

    pub fn with_removal_policy(mut self, policy: RemovalPolicyKind) -> Self {
        self.removal_policy = policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.processing_duration == 0 {
            return Err(EngineError::InvalidConfig(
                "processing_duration must be at least one tick".to_string(),
            ));
        }
        Ok(())
    }
}
