//! Greedy order-to-bot pairing

use counter_core::{BotId, OrderId};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::pool::BotPool;
use crate::queue::OrderQueue;

/// One bot bound to one order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub order_id: OrderId,
    pub bot_id: BotId,
    /// Countdown the bot starts from
    pub duration: u32,
}

/// Pairs idle bots with pending orders
///
/// Pending orders are served strictly in queue order; the earliest-admitted
/// idle bot takes the earliest pending order.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher {
    processing_duration: u32,
}

impl Dispatcher {
    pub fn new(processing_duration: u32) -> Self {
        Self {
            processing_duration,
        }
    }

    pub fn processing_duration(&self) -> u32 {
        self.processing_duration
    }

    /// Make a single pairing, if an idle bot and a pending order both exist
    pub fn try_assign_one(
        &self,
        queue: &mut OrderQueue,
        pool: &mut BotPool,
    ) -> Option<Assignment> {
        let bot_id = pool.first_idle()?.id;
        let order_id = queue.first_pending()?.id;

        pool.get_mut(bot_id)?
            .start(order_id, self.processing_duration);
        queue.get_mut(order_id)?.assign(bot_id);

        debug!(
            "Assigned order {} to {} for {} ticks",
            order_id, bot_id, self.processing_duration
        );

        Some(Assignment {
            order_id,
            bot_id,
            duration: self.processing_duration,
        })
    }

    /// Pair until nothing is left to pair
    pub fn drain(&self, queue: &mut OrderQueue, pool: &mut BotPool) -> Vec<Assignment> {
        let mut assignments = Vec::new();
        while let Some(assignment) = self.try_assign_one(queue, pool) {
            assignments.push(assignment);
        }
        assignments
    }
}
