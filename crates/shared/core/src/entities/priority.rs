use serde::{Deserialize, Serialize};
use std::fmt;

/// Order priority class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    /// Served ahead of every normal order not yet taken by a bot
    Vip,
    Normal,
}

impl Priority {
    pub fn is_vip(&self) -> bool {
        matches!(self, Priority::Vip)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Vip => f.write_str("VIP"),
            Priority::Normal => f.write_str("NORMAL"),
        }
    }
}
