//! Counter Removal Policies
//!
//! Implementations of bot removal policies for the order counter simulation.
//!
//! Both policies remove an idle bot when one exists (the earliest admitted).
//! They differ only when every bot is busy.

mod least_progress;
mod nearest_completion;

pub use least_progress::LeastProgressRemoval;
pub use nearest_completion::NearestCompletionRemoval;

// Re-export the trait from ports for convenience
pub use counter_ports::RemovalPolicy;

use counter_core::{Bot, BotId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Selectable removal policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPolicyKind {
    /// Remove the busy bot with the most time left
    #[default]
    LeastProgress,
    /// Remove the busy bot with the least time left
    NearestCompletion,
}

impl fmt::Display for RemovalPolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemovalPolicyKind::LeastProgress => f.write_str("least_progress"),
            RemovalPolicyKind::NearestCompletion => f.write_str("nearest_completion"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown removal policy: {0}")]
pub struct UnknownPolicy(pub String);

impl FromStr for RemovalPolicyKind {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "least-progress" | "least_progress" | "leastprogress" => {
                Ok(RemovalPolicyKind::LeastProgress)
            }
            "nearest-completion" | "nearest_completion" | "nearestcompletion" => {
                Ok(RemovalPolicyKind::NearestCompletion)
            }
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

/// Factory function to create removal policies by kind
pub fn create_removal_policy(kind: RemovalPolicyKind) -> Box<dyn RemovalPolicy> {
    match kind {
        RemovalPolicyKind::LeastProgress => Box::new(LeastProgressRemoval::new()),
        RemovalPolicyKind::NearestCompletion => Box::new(NearestCompletionRemoval::new()),
    }
}

/// Earliest-admitted idle bot, if any
///
/// `bots` is in admission order, so the first idle entry wins.
pub(crate) fn first_idle(bots: &[Bot]) -> Option<BotId> {
    bots.iter().find(|bot| bot.is_idle()).map(|bot| bot.id)
}
