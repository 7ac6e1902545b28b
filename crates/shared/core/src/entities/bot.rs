use serde::{Deserialize, Serialize};

use crate::values::{BotId, OrderId};

/// Flat bot status, as shown to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BotStatus {
    Idle,
    Busy,
}

/// Work state of a bot
///
/// A busy bot always carries both its order and its countdown, so the
/// "busy iff both work fields are set" rule cannot be broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BotState {
    Idle,
    Busy {
        order_id: OrderId,
        /// Ticks left before the order completes
        remaining: u32,
    },
}

/// A worker that processes one order at a time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bot {
    pub id: BotId,
    pub state: BotState,
}

impl Bot {
    /// Create a new idle bot
    pub fn new(id: BotId) -> Self {
        Self {
            id,
            state: BotState::Idle,
        }
    }

    pub fn status(&self) -> BotStatus {
        match self.state {
            BotState::Idle => BotStatus::Idle,
            BotState::Busy { .. } => BotStatus::Busy,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, BotState::Idle)
    }

    pub fn is_busy(&self) -> bool {
        !self.is_idle()
    }

    /// Order currently being processed, if busy
    pub fn current_order_id(&self) -> Option<OrderId> {
        match self.state {
            BotState::Idle => None,
            BotState::Busy { order_id, .. } => Some(order_id),
        }
    }

    /// Remaining countdown, if busy
    pub fn seconds_remaining(&self) -> Option<u32> {
        match self.state {
            BotState::Idle => None,
            BotState::Busy { remaining, .. } => Some(remaining),
        }
    }

    /// IDLE -> BUSY on `order_id` for `duration` ticks
    pub fn start(&mut self, order_id: OrderId, duration: u32) {
        debug_assert!(self.is_idle(), "{} is already busy", self.id);
        self.state = BotState::Busy {
            order_id,
            remaining: duration,
        };
    }

    /// Count down one tick, saturating at zero
    ///
    /// Returns true only on the call that takes the countdown from one to zero.
    pub fn count_down(&mut self) -> bool {
        match &mut self.state {
            BotState::Busy { remaining, .. } if *remaining > 0 => {
                *remaining -= 1;
                *remaining == 0
            }
            _ => false,
        }
    }

    /// Drop any work and return to idle, yielding the order that was held
    pub fn release(&mut self) -> Option<OrderId> {
        let order_id = self.current_order_id();
        self.state = BotState::Idle;
        order_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_flat_view() {
        let mut bot = Bot::new(BotId::new(1));
        assert_eq!(bot.status(), BotStatus::Idle);
        assert_eq!(bot.current_order_id(), None);
        assert_eq!(bot.seconds_remaining(), None);

        bot.start(OrderId::new(9), 10);
        assert_eq!(bot.status(), BotStatus::Busy);
        assert_eq!(bot.current_order_id(), Some(OrderId::new(9)));
        assert_eq!(bot.seconds_remaining(), Some(10));
    }

    #[test]
    fn test_count_down_reports_zero_once() {
        let mut bot = Bot::new(BotId::new(1));
        bot.start(OrderId::new(1), 2);

        assert!(!bot.count_down());
        assert!(bot.count_down());
        assert_eq!(bot.seconds_remaining(), Some(0));
        // Saturates and does not report again
        assert!(!bot.count_down());
        assert_eq!(bot.seconds_remaining(), Some(0));
    }

    #[test]
    fn test_idle_bot_does_not_count() {
        let mut bot = Bot::new(BotId::new(2));
        assert!(!bot.count_down());
        assert!(bot.is_idle());
    }

    #[test]
    fn test_release_returns_order() {
        let mut bot = Bot::new(BotId::new(4));
        bot.start(OrderId::new(12), 10);

        assert_eq!(bot.release(), Some(OrderId::new(12)));
        assert!(bot.is_idle());
        assert_eq!(bot.release(), None);
    }
}
