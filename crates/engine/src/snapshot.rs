//! Read-only engine views for rendering

use counter_core::{Bot, BotId, Order, OrderId, Tick};
use serde::{Deserialize, Serialize};

/// Point-in-time copy of all orders and bots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub tick: Tick,
    /// Orders in queue order
    pub orders: Vec<Order>,
    /// Bots in admission order
    pub bots: Vec<Bot>,
}

/// Counts per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    pub pending: usize,
    pub processing: usize,
    pub completed: usize,
    pub idle_bots: usize,
    pub busy_bots: usize,
}

impl EngineSnapshot {
    pub fn pending(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter().filter(|o| o.is_pending())
    }

    pub fn processing(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter().filter(|o| o.is_processing())
    }

    pub fn completed(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter().filter(|o| o.is_complete())
    }

    pub fn idle_bots(&self) -> impl Iterator<Item = &Bot> {
        self.bots.iter().filter(|b| b.is_idle())
    }

    pub fn busy_bots(&self) -> impl Iterator<Item = &Bot> {
        self.bots.iter().filter(|b| b.is_busy())
    }

    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn bot(&self, id: BotId) -> Option<&Bot> {
        self.bots.iter().find(|b| b.id == id)
    }

    /// Order ids in queue order
    pub fn queue_ids(&self) -> Vec<OrderId> {
        self.orders.iter().map(|o| o.id).collect()
    }

    pub fn stats(&self) -> EngineStats {
        let idle_bots = self.idle_bots().count();
        EngineStats {
            pending: self.pending().count(),
            processing: self.processing().count(),
            completed: self.completed().count(),
            idle_bots,
            busy_bots: self.bots.len() - idle_bots,
        }
    }
}
