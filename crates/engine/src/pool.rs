//! Bot pool and countdown

use counter_core::{Bot, BotId, OrderId};
use counter_ports::RemovalPolicy;
use serde::{Deserialize, Serialize};

/// What a removal request did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RemovalOutcome {
    /// The pool was empty
    Noop,
    RemovedIdle { bot_id: BotId },
    /// A busy bot was removed; its order must go back to pending
    RemovedBusy { bot_id: BotId, requeued: OrderId },
}

impl RemovalOutcome {
    pub fn removed(&self) -> Option<BotId> {
        match *self {
            RemovalOutcome::Noop => None,
            RemovalOutcome::RemovedIdle { bot_id } | RemovalOutcome::RemovedBusy { bot_id, .. } => {
                Some(bot_id)
            }
        }
    }

    pub fn requeued(&self) -> Option<OrderId> {
        match *self {
            RemovalOutcome::RemovedBusy { requeued, .. } => Some(requeued),
            _ => None,
        }
    }
}

/// Bots in admission order
#[derive(Debug, Clone, Default)]
pub struct BotPool {
    bots: Vec<Bot>,
    last_id: u64,
}

impl BotPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next bot id and append an idle bot
    pub fn add(&mut self) -> &Bot {
        self.last_id += 1;
        self.bots.push(Bot::new(BotId::new(self.last_id)));
        &self.bots[self.bots.len() - 1]
    }

    /// Earliest-admitted idle bot
    pub fn first_idle(&self) -> Option<&Bot> {
        self.bots.iter().find(|b| b.is_idle())
    }

    pub fn get(&self, id: BotId) -> Option<&Bot> {
        self.bots.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BotId) -> Option<&mut Bot> {
        self.bots.iter_mut().find(|b| b.id == id)
    }

    /// Count every busy bot down by one
    ///
    /// All bots decrement in a single pass over the same starting state.
    /// Returns the bots that reached zero on this call, in admission order.
    /// Status is left untouched; completing the work is the caller's job.
    pub fn tick(&mut self) -> Vec<BotId> {
        self.bots
            .iter_mut()
            .filter_map(|bot| bot.count_down().then_some(bot.id))
            .collect()
    }

    /// Remove the bot chosen by `policy`
    ///
    /// A busy victim is dropped together with its work; the returned outcome
    /// names the order so the caller can put it back to pending.
    pub fn remove_one(&mut self, policy: &dyn RemovalPolicy) -> RemovalOutcome {
        let Some(victim) = policy.select_victim(&self.bots) else {
            debug_assert!(
                self.bots.is_empty(),
                "{} selected no victim from a non-empty pool",
                policy.name()
            );
            return RemovalOutcome::Noop;
        };
        let Some(index) = self.bots.iter().position(|b| b.id == victim) else {
            debug_assert!(false, "{} selected unknown {}", policy.name(), victim);
            return RemovalOutcome::Noop;
        };

        let mut bot = self.bots.remove(index);
        match bot.release() {
            Some(order_id) => RemovalOutcome::RemovedBusy {
                bot_id: bot.id,
                requeued: order_id,
            },
            None => RemovalOutcome::RemovedIdle { bot_id: bot.id },
        }
    }

    pub fn all(&self) -> &[Bot] {
        &self.bots
    }

    pub fn len(&self) -> usize {
        self.bots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use counter_removal::LeastProgressRemoval;

    #[test]
    fn test_add_allocates_monotonic_ids() {
        let mut pool = BotPool::new();
        assert_eq!(pool.add().id, BotId::new(1));
        assert_eq!(pool.add().id, BotId::new(2));

        pool.remove_one(&LeastProgressRemoval::new());
        // Ids are never reused
        assert_eq!(pool.add().id, BotId::new(3));
    }

    #[test]
    fn test_first_idle_is_earliest_admitted() {
        let mut pool = BotPool::new();
        pool.add();
        pool.add();
        pool.get_mut(BotId::new(1))
            .unwrap()
            .start(OrderId::new(1), 10);

        assert_eq!(pool.first_idle().map(|b| b.id), Some(BotId::new(2)));
    }

    #[test]
    fn test_tick_reports_bots_reaching_zero() {
        let mut pool = BotPool::new();
        pool.add();
        pool.add();
        pool.add();
        pool.get_mut(BotId::new(1)).unwrap().start(OrderId::new(1), 1);
        pool.get_mut(BotId::new(2)).unwrap().start(OrderId::new(2), 3);

        assert_eq!(pool.tick(), vec![BotId::new(1)]);
        assert_eq!(
            pool.get(BotId::new(2)).unwrap().seconds_remaining(),
            Some(2)
        );
        // Idle bot untouched
        assert!(pool.get(BotId::new(3)).unwrap().is_idle());
    }

    #[test]
    fn test_tick_with_no_busy_bots_is_noop() {
        let mut pool = BotPool::new();
        pool.add();
        assert!(pool.tick().is_empty());
    }

    #[test]
    fn test_remove_from_empty_pool() {
        let mut pool = BotPool::new();
        assert_eq!(
            pool.remove_one(&LeastProgressRemoval::new()),
            RemovalOutcome::Noop
        );
    }

    #[test]
    fn test_remove_busy_reports_order() {
        let mut pool = BotPool::new();
        pool.add();
        pool.get_mut(BotId::new(1)).unwrap().start(OrderId::new(5), 7);

        let outcome = pool.remove_one(&LeastProgressRemoval::new());

        assert_eq!(
            outcome,
            RemovalOutcome::RemovedBusy {
                bot_id: BotId::new(1),
                requeued: OrderId::new(5),
            }
        );
        assert_eq!(outcome.removed(), Some(BotId::new(1)));
        assert_eq!(outcome.requeued(), Some(OrderId::new(5)));
        assert!(pool.is_empty());
    }
}
