use serde::{Deserialize, Serialize};

use super::{OrderStatus, Priority};
use crate::values::{BotId, OrderId, Tick};

/// A customer order waiting for, being cooked by, or served by a bot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub priority: Priority,
    pub status: OrderStatus,
    /// Set while processing and kept once complete; cleared on revert
    pub assigned_bot: Option<BotId>,
    /// Tick at which the order was submitted
    pub submitted_at: Tick,
}

impl Order {
    /// Create a new pending order
    pub fn new(id: OrderId, priority: Priority, submitted_at: Tick) -> Self {
        Self {
            id,
            priority,
            status: OrderStatus::Pending,
            assigned_bot: None,
            submitted_at,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    pub fn is_processing(&self) -> bool {
        self.status == OrderStatus::Processing
    }

    pub fn is_complete(&self) -> bool {
        self.status == OrderStatus::Complete
    }

    /// PENDING -> PROCESSING, bound to `bot`
    pub fn assign(&mut self, bot: BotId) {
        debug_assert!(self.is_pending(), "assigning non-pending order {}", self.id);
        self.status = OrderStatus::Processing;
        self.assigned_bot = Some(bot);
    }

    /// PROCESSING -> COMPLETE; the completing bot stays recorded
    pub fn complete(&mut self) {
        debug_assert!(
            self.is_processing(),
            "completing order {} in status {:?}",
            self.id,
            self.status
        );
        self.status = OrderStatus::Complete;
    }

    /// PROCESSING -> PENDING after its bot was removed
    pub fn revert(&mut self) {
        debug_assert!(
            self.is_processing(),
            "reverting order {} in status {:?}",
            self.id,
            self.status
        );
        self.status = OrderStatus::Pending;
        self.assigned_bot = None;
    }
}
