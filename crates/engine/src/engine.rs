//! Simulation engine - owns the queue and the pool and keeps them consistent

use counter_core::{BotId, OrderId, Priority, Tick};
use counter_ports::{InvariantResult, InvariantViolation, RemovalPolicy};
use counter_removal::create_removal_policy;
use log::{debug, error, info, trace};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

use crate::config::EngineConfig;
use crate::dispatcher::{Assignment, Dispatcher};
use crate::error::Result;
use crate::events::EngineEvent;
use crate::pool::{BotPool, RemovalOutcome};
use crate::queue::OrderQueue;
use crate::snapshot::EngineSnapshot;

/// Oldest events are dropped past this many undrained entries
const MAX_BUFFERED_EVENTS: usize = 4096;

/// An order finished by a bot during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub order_id: OrderId,
    pub bot_id: BotId,
}

/// What one clock firing did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: Tick,
    pub completed: Vec<Completion>,
    /// Pairings made by the drain at the end of the tick
    pub assigned: Vec<Assignment>,
}

/// The single object a presentation layer talks to
///
/// All operations are synchronous and run to completion. Every mutating call
/// and every tick finishes with a dispatch drain, so on return no idle bot
/// coexists with a pending order.
pub struct SimulationEngine {
    config: EngineConfig,
    queue: OrderQueue,
    pool: BotPool,
    dispatcher: Dispatcher,
    removal: Box<dyn RemovalPolicy>,
    tick: Tick,
    events: VecDeque<EngineEvent>,
}

impl SimulationEngine {
    /// Create an engine with validated configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let engine = Self::build(config);

        info!(
            "Creating engine: processing_duration={}, removal_policy={}",
            engine.dispatcher.processing_duration(),
            engine.removal.name()
        );
        Ok(engine)
    }

    fn build(config: EngineConfig) -> Self {
        Self {
            config,
            queue: OrderQueue::new(),
            pool: BotPool::new(),
            dispatcher: Dispatcher::new(config.processing_duration),
            removal: create_removal_policy(config.removal_policy),
            tick: 0,
            events: VecDeque::new(),
        }
    }

    /// Submit a new order and dispatch
    pub fn submit_order(&mut self, priority: Priority) -> OrderId {
        let order_id = self.queue.submit(priority, self.tick).id;
        info!("Order submitted: id={}, priority={}", order_id, priority);
        self.record(EngineEvent::OrderSubmitted { order_id, priority });

        self.dispatch();
        self.debug_verify();
        order_id
    }

    /// Admit a new idle bot and dispatch
    pub fn add_bot(&mut self) -> BotId {
        let bot_id = self.pool.add().id;
        info!("Bot added: id={}, pool_size={}", bot_id, self.pool.len());
        self.record(EngineEvent::BotAdded { bot_id });

        self.dispatch();
        self.debug_verify();
        bot_id
    }

    /// Remove one bot according to the removal policy
    ///
    /// Does nothing on an empty pool. A busy victim's order goes back to
    /// pending in its original queue slot and is re-dispatched right away
    /// if another bot is idle.
    pub fn remove_bot(&mut self) -> RemovalOutcome {
        let outcome = self.pool.remove_one(self.removal.as_ref());

        match outcome {
            RemovalOutcome::Noop => {
                debug!("Remove bot requested on an empty pool");
                return outcome;
            }
            RemovalOutcome::RemovedIdle { bot_id } => {
                info!("Bot removed: id={} (idle)", bot_id);
                self.record(EngineEvent::BotRemoved {
                    bot_id,
                    requeued: None,
                });
            }
            RemovalOutcome::RemovedBusy { bot_id, requeued } => {
                match self.queue.get_mut(requeued) {
                    Some(order) => order.revert(),
                    None => error!("Removed {} was working on unknown order {}", bot_id, requeued),
                }
                info!("Bot removed: id={}, order {} back to pending", bot_id, requeued);
                self.record(EngineEvent::BotRemoved {
                    bot_id,
                    requeued: Some(requeued),
                });
                self.record(EngineEvent::OrderRequeued { order_id: requeued });
            }
        }

        self.dispatch();
        self.debug_verify();
        outcome
    }

    /// Advance the clock by one tick
    ///
    /// Counts every busy bot down from the state at the start of the tick,
    /// completes the orders of the bots that reached zero, then dispatches
    /// so freed bots pick up pending work within the same tick.
    pub fn tick(&mut self) -> TickReport {
        self.tick += 1;
        let finished = self.pool.tick();

        let mut completed = Vec::with_capacity(finished.len());
        for bot_id in finished {
            let Some(order_id) = self.pool.get_mut(bot_id).and_then(|bot| bot.release()) else {
                error!("{} reached zero without an order", bot_id);
                continue;
            };
            match self.queue.get_mut(order_id) {
                Some(order) if order.is_processing() => {
                    order.complete();
                    debug!("Order completed: id={}, bot={}", order_id, bot_id);
                    self.events
                        .push_back(EngineEvent::OrderCompleted { order_id, bot_id });
                    completed.push(Completion { order_id, bot_id });
                }
                Some(order) => error!(
                    "{} finished order {} which is {:?}",
                    bot_id, order_id, order.status
                ),
                None => error!("{} finished unknown order {}", bot_id, order_id),
            }
        }
        self.trim_events();

        let assigned = self.dispatch();
        trace!(
            "Tick {}: {} completed, {} assigned",
            self.tick,
            completed.len(),
            assigned.len()
        );
        self.debug_verify();

        TickReport {
            tick: self.tick,
            completed,
            assigned,
        }
    }

    /// Run `count` ticks back to back
    pub fn advance(&mut self, count: u64) -> Vec<TickReport> {
        (0..count).map(|_| self.tick()).collect()
    }

    /// Copy of the current state for rendering
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            tick: self.tick,
            orders: self.queue.all().to_vec(),
            bots: self.pool.all().to_vec(),
        }
    }

    /// Drain events recorded since the last call
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        self.events.drain(..).collect()
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn removal_policy(&self) -> &str {
        self.removal.name()
    }

    pub fn queue(&self) -> &OrderQueue {
        &self.queue
    }

    pub fn pool(&self) -> &BotPool {
        &self.pool
    }

    /// Check every queue and pool invariant
    pub fn verify(&self) -> InvariantResult<()> {
        let mut owners: HashMap<OrderId, BotId> = HashMap::new();

        for bot in self.pool.all() {
            let Some(order_id) = bot.current_order_id() else {
                continue;
            };
            if let Some(first) = owners.insert(order_id, bot.id) {
                return Err(InvariantViolation::DuplicateBinding {
                    order: order_id,
                    first,
                    second: bot.id,
                });
            }
            let order = self
                .queue
                .get(order_id)
                .ok_or(InvariantViolation::UnknownOrder {
                    bot: bot.id,
                    order: order_id,
                })?;
            if !order.is_processing() || order.assigned_bot != Some(bot.id) {
                return Err(InvariantViolation::OrderBotMismatch {
                    bot: bot.id,
                    order: order_id,
                    bound: order.assigned_bot,
                });
            }
        }

        self.queue.check_sequence()?;

        let mut first_pending_normal: Option<OrderId> = None;
        for order in self.queue.all() {
            if order.is_pending() && order.assigned_bot.is_some() {
                return Err(InvariantViolation::PendingOrderBound(order.id));
            }
            if order.is_processing() && !owners.contains_key(&order.id) {
                return Err(InvariantViolation::ProcessingOrderUnbound(order.id));
            }
            if order.is_pending() {
                match (order.priority, first_pending_normal) {
                    (Priority::Normal, None) => first_pending_normal = Some(order.id),
                    (Priority::Vip, Some(normal)) => {
                        return Err(InvariantViolation::PriorityOrder {
                            normal,
                            vip: order.id,
                        });
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn dispatch(&mut self) -> Vec<Assignment> {
        let assignments = self.dispatcher.drain(&mut self.queue, &mut self.pool);
        for assignment in &assignments {
            self.events.push_back(EngineEvent::OrderAssigned {
                order_id: assignment.order_id,
                bot_id: assignment.bot_id,
            });
        }
        self.trim_events();
        assignments
    }

    fn record(&mut self, event: EngineEvent) {
        self.events.push_back(event);
        self.trim_events();
    }

    fn trim_events(&mut self) {
        while self.events.len() > MAX_BUFFERED_EVENTS {
            self.events.pop_front();
        }
    }

    fn debug_verify(&self) {
        if cfg!(debug_assertions) {
            if let Err(violation) = self.verify() {
                panic!("engine invariant violated: {violation}");
            }
        }
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::build(EngineConfig::default())
    }
}
